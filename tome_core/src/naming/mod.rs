//! Name composition - placeholder substitution for book and spell labels

use crate::config::Settings;
use crate::types::ModKey;
use heck::ToTitleCase;
use std::collections::HashMap;

/// Placeholders recognized in the book name template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Tier name from the settings
    Level,
    /// Original spell name
    Spell,
    /// Base name of the plugin that defined the book
    Plugin,
    /// Display name of the plugin that supplied the winning book
    Mod,
    /// School of the spell's dominant effect
    School,
}

impl Token {
    pub fn all() -> &'static [Token] {
        &[Token::Level, Token::Spell, Token::Plugin, Token::Mod, Token::School]
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Token::Level => "<level>",
            Token::Spell => "<spell>",
            Token::Plugin => "<plugin>",
            Token::Mod => "<mod>",
            Token::School => "<school>",
        }
    }

    /// Whether `template` mentions this placeholder
    pub fn appears_in(&self, template: &str) -> bool {
        template.contains(self.placeholder())
    }
}

/// Substitution values, keyed by token; unset tokens substitute to ""
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    values: HashMap<Token, String>,
}

impl TokenSet {
    pub fn new() -> Self {
        TokenSet {
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, token: Token, value: impl Into<String>) -> Self {
        self.set(token, value);
        self
    }

    pub fn set(&mut self, token: Token, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }
}

/// Replace every placeholder occurrence in `template` with its token value
///
/// Single pass: substituted values are never rescanned, so the result does not
/// depend on the order tokens were set.
pub fn compose(template: &str, tokens: &TokenSet) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match Token::all().iter().find(|t| tail.starts_with(t.placeholder())) {
            Some(token) => {
                out.push_str(tokens.get(*token).unwrap_or(""));
                rest = &tail[token.placeholder().len()..];
            }
            None => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Best-effort display name from a plugin's base name
pub fn title_case_mod_name(mod_key: &ModKey) -> String {
    mod_key.name().to_title_case()
}

/// Display name of a plugin for `<mod>` and the spell prefix
///
/// Looks up the winning plugin's file name in the configured pairs, falling
/// back to a title-cased form of the record's origin plugin name.
pub fn mod_display_name(settings: &Settings, winning_mod: &ModKey, origin: &ModKey) -> String {
    match settings.mod_name_for(&winning_mod.file_name()) {
        Some(name) => name.to_string(),
        None => title_case_mod_name(origin),
    }
}

/// New spell label: `"<mod display name>: <spell name>"`
pub fn spell_label(mod_name: &str, spell_name: &str) -> String {
    format!("{}: {}", mod_name, spell_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mod_key(s: &str) -> ModKey {
        ModKey::from_file_name(s).unwrap()
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let tokens = TokenSet::new().with(Token::Spell, "Flames");
        assert_eq!(compose("Spell Tome <unknown> > <", &tokens), "Spell Tome <unknown> > <");
        assert_eq!(compose("", &tokens), "");
    }

    #[test]
    fn test_single_placeholder_yields_value() {
        for token in Token::all() {
            let tokens = TokenSet::new().with(*token, "value");
            assert_eq!(compose(token.placeholder(), &tokens), "value");
        }
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let tokens = TokenSet::new()
            .with(Token::Spell, "Flames")
            .with(Token::Level, "Novice")
            .with(Token::School, "Destruction");
        assert_eq!(
            compose("<spell> - <school> <level> (<spell>)", &tokens),
            "Flames - Destruction Novice (Flames)"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let tokens = TokenSet::new()
            .with(Token::Spell, "<level>")
            .with(Token::Level, "Adept");
        assert_eq!(compose("<spell>/<level>", &tokens), "<level>/Adept");
    }

    #[test]
    fn test_unset_token_is_empty() {
        assert_eq!(compose("[<mod>]", &TokenSet::new()), "[]");
    }

    #[test]
    fn test_appears_in() {
        assert!(Token::Level.appears_in("Tome (<level>)"));
        assert!(!Token::School.appears_in("Tome (<level>)"));
    }

    #[test]
    fn test_mod_display_name_prefers_configured_pair() {
        let mut settings = Settings::default();
        settings
            .plugin_mod_name_pairs
            .insert("Apocalypse - Magic of Skyrim.esp".to_string(), "Apocalypse".to_string());

        let apocalypse = mod_key("Apocalypse - Magic of Skyrim.esp");
        assert_eq!(mod_display_name(&settings, &apocalypse, &apocalypse), "Apocalypse");
    }

    #[test]
    fn test_mod_display_name_falls_back_to_title_case() {
        let settings = Settings::default();
        let winning = mod_key("Tweaks.esp");
        let origin = mod_key("better_spell-learning.esp");
        assert_eq!(mod_display_name(&settings, &winning, &origin), "Better Spell Learning");
        assert_eq!(title_case_mod_name(&mod_key("PostReqtifiers.esp")), "Post Reqtifiers");
    }

    #[test]
    fn test_spell_label() {
        assert_eq!(spell_label("Skyrim", "Flames"), "Skyrim: Flames");
    }
}
