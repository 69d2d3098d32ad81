//! Patch run - rename every winning spell tome and the spell it teaches
//!
//! Books are processed one at a time in winning-override order. Each book ends
//! in one of three ways:
//! - renamed: the book and its spell receive overrides in the patch
//! - skipped: not a named spell tome, or no spell/school info could be derived
//! - failed: a [`RecordError`] is logged and the run moves on

use crate::config::Settings;
use crate::discovery::{better_spell_learning, taught_spell};
use crate::naming::{compose, mod_display_name, spell_label, Token, TokenSet};
use crate::patch::{PatchError, PatchMod};
use crate::record::Book;
use crate::scoring::{school_name, spell_info};
use crate::source::{winning_overrides, RecordStore, WinningContext};
use crate::types::{FormKey, ModKey};
use std::collections::HashMap;
use thiserror::Error;

/// Fatal setup problem; no book is processed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Load order is empty")]
    EmptyLoadOrder,
    #[error("Patch plugin {0} must not be part of its own input load order")]
    PatchInLoadOrder(ModKey),
}

/// Per-book failure, tagged with the record it happened on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} [{form_key} {} from {mod_key}]", .editor_id.as_deref().unwrap_or("<no editor id>"))]
pub struct RecordError {
    /// Plugin supplying the winning version of the book
    pub mod_key: ModKey,
    pub form_key: FormKey,
    pub editor_id: Option<String>,
    pub source: PatchError,
}

impl RecordError {
    fn new(context: &WinningContext<'_, Book>, source: PatchError) -> Self {
        RecordError {
            mod_key: context.mod_key.clone(),
            form_key: context.record.form_key.clone(),
            editor_id: context.record.editor_id.clone(),
            source,
        }
    }
}

/// Why a book was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Unnamed,
    NotSpellTome,
    NoTaughtSpell,
    UnnamedSpell,
    /// Template needs school or level but no effect could be scored
    NoSpellInfo,
}

/// A book that received a new name
#[derive(Debug, Clone, PartialEq)]
pub struct RenamedBook {
    pub form_key: FormKey,
    pub old_name: String,
    pub new_name: String,
    pub spell: FormKey,
    pub spell_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookOutcome {
    Renamed(RenamedBook),
    Skipped(SkipReason),
}

/// Summary of a patch run
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    pub renamed: Vec<RenamedBook>,
    pub skipped: HashMap<SkipReason, usize>,
    pub errors: Vec<RecordError>,
}

impl PatchReport {
    /// Number of books skipped for `reason`
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Renames spell tomes found in a record store
pub struct Patcher<'a, S: RecordStore> {
    store: &'a S,
    settings: &'a Settings,
    spell_tome_keyword: FormKey,
    /// Whether Better Spell Learning is in the load order
    companion_active: bool,
}

impl<'a, S: RecordStore> Patcher<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Patcher {
            store,
            settings,
            spell_tome_keyword: FormKey::vendor_item_spell_tome(),
            companion_active: store.has_mod(&better_spell_learning()),
        }
    }

    pub fn companion_active(&self) -> bool {
        self.companion_active
    }

    /// Process every winning book, writing overrides into `patch`
    pub fn run(&self, patch: &mut PatchMod) -> Result<PatchReport, RunError> {
        if self.store.plugins().is_empty() {
            return Err(RunError::EmptyLoadOrder);
        }
        if self.store.has_mod(patch.mod_key()) {
            return Err(RunError::PatchInLoadOrder(patch.mod_key().clone()));
        }

        let mut report = PatchReport::default();
        for context in winning_overrides::<Book, _>(self.store) {
            match self.process_book(&context, patch) {
                Ok(BookOutcome::Renamed(renamed)) => report.renamed.push(renamed),
                Ok(BookOutcome::Skipped(reason)) => {
                    *report.skipped.entry(reason).or_insert(0) += 1;
                }
                Err(source) => {
                    let error = RecordError::new(&context, source);
                    tracing::error!(
                        mod_key = %error.mod_key,
                        form_key = %error.form_key,
                        "{}",
                        error
                    );
                    report.errors.push(error);
                }
            }
        }

        tracing::debug!(
            renamed = report.renamed.len(),
            skipped = report.total_skipped(),
            errors = report.errors.len(),
            "Patch run finished"
        );
        Ok(report)
    }

    /// Rename one book and the spell it teaches
    pub fn process_book(
        &self,
        context: &WinningContext<'_, Book>,
        patch: &mut PatchMod,
    ) -> Result<BookOutcome, PatchError> {
        let book = context.record;
        let Some(old_name) = book.name.as_deref() else {
            return Ok(BookOutcome::Skipped(SkipReason::Unnamed));
        };
        if !book.has_keyword(&self.spell_tome_keyword) {
            return Ok(BookOutcome::Skipped(SkipReason::NotSpellTome));
        }
        let Some(spell) = taught_spell(self.store, book, self.companion_active) else {
            return Ok(BookOutcome::Skipped(SkipReason::NoTaughtSpell));
        };
        let Some(spell_name) = spell.name.as_deref() else {
            return Ok(BookOutcome::Skipped(SkipReason::UnnamedSpell));
        };

        let format = &self.settings.format;
        let origin = &book.form_key.mod_key;
        let mod_name = mod_display_name(self.settings, context.mod_key, origin);

        let mut tokens = TokenSet::new()
            .with(Token::Spell, spell_name)
            .with(Token::Plugin, origin.name());
        if Token::Mod.appears_in(format) {
            tokens.set(Token::Mod, mod_name.as_str());
        }
        if Token::School.appears_in(format) || Token::Level.appears_in(format) {
            let Some(info) = spell_info(self.store, spell) else {
                tracing::warn!(book = old_name, "Cannot determine school and level for book");
                return Ok(BookOutcome::Skipped(SkipReason::NoSpellInfo));
            };
            tokens.set(Token::School, school_name(info.school));
            tokens.set(Token::Level, info.level.name(&self.settings.level_names));
        }

        let new_name = compose(format, &tokens);

        // Both overrides must be writable before either is touched
        patch.check_override(spell)?;
        patch.check_override(book)?;
        patch.get_or_add_override(spell)?.name = Some(spell_label(&mod_name, spell_name));
        patch.get_or_add_override(book)?.name = Some(new_name.clone());
        tracing::info!("{} -> {}", old_name, new_name);

        Ok(BookOutcome::Renamed(RenamedBook {
            form_key: book.form_key.clone(),
            old_name: old_name.to_string(),
            new_name,
            spell: spell.form_key.clone(),
            spell_name: spell_name.to_string(),
        }))
    }
}

/// Run the patcher over `store` with `settings`, accumulating overrides in `patch`
pub fn run_patch<S: RecordStore>(
    store: &S,
    settings: &Settings,
    patch: &mut PatchMod,
) -> Result<PatchReport, RunError> {
    Patcher::new(store, settings).run(patch)
}
