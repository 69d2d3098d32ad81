//! Patcher settings: output template, tier names, and plugin display names

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// User settings, built once at startup and passed by reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Template for the new book name
    #[serde(default = "default_format")]
    pub format: String,
    /// Tier names, index 0 (novice) through 4 (master)
    #[serde(default = "default_level_names")]
    pub level_names: [String; 5],
    /// Plugin file name -> display name used for `<mod>`
    #[serde(default)]
    pub plugin_mod_name_pairs: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format: default_format(),
            level_names: default_level_names(),
            plugin_mod_name_pairs: HashMap::new(),
        }
    }
}

fn default_format() -> String {
    "Spell Tome: <spell> (<level>)".to_string()
}

fn default_level_names() -> [String; 5] {
    ["Novice", "Apprentice", "Adept", "Expert", "Master"].map(String::from)
}

impl Settings {
    /// Load settings from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => super::load_json(path)?,
            _ => super::load_toml(path)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = super::parse_toml(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = super::parse_json(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "format template is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Display name configured for a plugin file name
    pub fn mod_name_for(&self, file_name: &str) -> Option<&str> {
        self.plugin_mod_name_pairs
            .get(file_name)
            .or_else(|| {
                self.plugin_mod_name_pairs
                    .iter()
                    .find(|(plugin, _)| plugin.eq_ignore_ascii_case(file_name))
                    .map(|(_, name)| name)
            })
            .map(String::as_str)
    }
}

/// Settings shipped with the crate
pub fn default_settings() -> Settings {
    let toml = include_str!("../../config/settings.toml");
    Settings::from_toml_str(toml).unwrap_or_default()
}
