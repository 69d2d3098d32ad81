//! LoadOrder - in-memory record store over an ordered list of plugins

use super::{LinkCache, Plugin, RecordStore};
use crate::config::{load_json, load_toml, ConfigError};
use crate::record::Record;
use crate::types::{FormKey, ModKey};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Setup failure while assembling a load order
#[derive(Error, Debug)]
pub enum LoadOrderError {
    #[error("Plugin {0} appears more than once in the load order")]
    DuplicateMod(ModKey),
    #[error("Plugin {plugin} requires master {master}, which is not loaded before it")]
    MissingMaster { plugin: ModKey, master: ModKey },
    #[error("Plugin {plugin} holds more than one record with form key {form_key}")]
    DuplicateRecord { plugin: ModKey, form_key: FormKey },
    #[error("Failed to load load order document: {0}")]
    Document(#[from] ConfigError),
}

/// Serialized shape of a load order fixture
#[derive(Debug, Deserialize)]
struct LoadOrderDocument {
    #[serde(default)]
    plugins: Vec<Plugin>,
}

/// Plugins in priority order (lowest first) with a winning-record index
#[derive(Debug, Clone, Default)]
pub struct LoadOrder {
    plugins: Vec<Plugin>,
    /// Form key -> (plugin index, record index) of the winning version
    winners: HashMap<FormKey, (usize, usize)>,
}

impl LoadOrder {
    /// Build a load order, validating mod uniqueness, master ordering and
    /// per-plugin record uniqueness
    pub fn new(plugins: Vec<Plugin>) -> Result<Self, LoadOrderError> {
        let mut seen: HashSet<&ModKey> = HashSet::new();
        for plugin in &plugins {
            for master in &plugin.masters {
                if !seen.contains(master) {
                    return Err(LoadOrderError::MissingMaster {
                        plugin: plugin.mod_key.clone(),
                        master: master.clone(),
                    });
                }
            }
            if !seen.insert(&plugin.mod_key) {
                return Err(LoadOrderError::DuplicateMod(plugin.mod_key.clone()));
            }

            let mut form_keys: HashSet<&FormKey> = HashSet::new();
            for record in &plugin.records {
                if !form_keys.insert(record.form_key()) {
                    return Err(LoadOrderError::DuplicateRecord {
                        plugin: plugin.mod_key.clone(),
                        form_key: record.form_key().clone(),
                    });
                }
            }
        }

        // Later plugins overwrite earlier entries
        let mut winners = HashMap::new();
        for (plugin_idx, plugin) in plugins.iter().enumerate() {
            for (record_idx, record) in plugin.records.iter().enumerate() {
                winners.insert(record.form_key().clone(), (plugin_idx, record_idx));
            }
        }

        Ok(LoadOrder { plugins, winners })
    }

    /// Load a fixture document from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self, LoadOrderError> {
        let document: LoadOrderDocument = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => load_json(path)?,
            _ => load_toml(path)?,
        };
        LoadOrder::new(document.plugins)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl LinkCache for LoadOrder {
    fn lookup(&self, key: &FormKey) -> Option<&Record> {
        self.winners
            .get(key)
            .map(|&(plugin_idx, record_idx)| &self.plugins[plugin_idx].records[record_idx])
    }
}

impl RecordStore for LoadOrder {
    fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Book, MajorRecord};

    fn mod_key(s: &str) -> ModKey {
        ModKey::from_file_name(s).unwrap()
    }

    fn key(s: &str) -> FormKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_later_plugin_wins() {
        let base = Plugin::new(mod_key("Skyrim.esm"))
            .with_record(Book::new(key("000A01:Skyrim.esm"), "Spell Tome: Flames"));
        let patch = Plugin::new(mod_key("Tweaks.esp"))
            .with_master(mod_key("Skyrim.esm"))
            .with_record(Book::new(key("000A01:Skyrim.esm"), "Flames (Tweaked)"));

        let load_order = LoadOrder::new(vec![base, patch]).unwrap();
        let record = load_order.lookup(&key("000A01:Skyrim.esm")).unwrap();
        let book = Book::from_record(record).unwrap();

        assert_eq!(book.name.as_deref(), Some("Flames (Tweaked)"));
        assert!(load_order.has_mod(&mod_key("Tweaks.esp")));
        assert!(!load_order.has_mod(&mod_key("Better Spell Learning.esp")));
    }

    #[test]
    fn test_duplicate_mod_rejected() {
        let result = LoadOrder::new(vec![
            Plugin::new(mod_key("Skyrim.esm")),
            Plugin::new(mod_key("Skyrim.esm")),
        ]);
        assert!(matches!(result, Err(LoadOrderError::DuplicateMod(_))));
    }

    #[test]
    fn test_duplicate_mod_ignores_case() {
        let result = LoadOrder::new(vec![
            Plugin::new(mod_key("Skyrim.esm")),
            Plugin::new(mod_key("skyrim.ESM")),
        ]);
        assert!(matches!(result, Err(LoadOrderError::DuplicateMod(_))));
    }

    #[test]
    fn test_master_matches_ignoring_case() {
        let load_order = LoadOrder::new(vec![
            Plugin::new(mod_key("Skyrim.esm")),
            Plugin::new(mod_key("Tweaks.esp")).with_master(mod_key("SKYRIM.esm")),
        ])
        .unwrap();
        assert!(load_order.has_mod(&mod_key("tweaks.esp")));
    }

    #[test]
    fn test_duplicate_record_in_plugin_rejected() {
        let result = LoadOrder::new(vec![Plugin::new(mod_key("Skyrim.esm"))
            .with_record(Book::new(key("000A01:Skyrim.esm"), "v1"))
            .with_record(Book::new(key("000A01:Skyrim.esm"), "v2"))]);

        match result {
            Err(LoadOrderError::DuplicateRecord { plugin, form_key }) => {
                assert_eq!(plugin, mod_key("Skyrim.esm"));
                assert_eq!(form_key, key("000A01:Skyrim.esm"));
            }
            other => panic!("expected DuplicateRecord, got {:?}", other.map(|lo| lo.len())),
        }
    }

    #[test]
    fn test_master_must_load_first() {
        let result = LoadOrder::new(vec![
            Plugin::new(mod_key("Tweaks.esp")).with_master(mod_key("Skyrim.esm")),
            Plugin::new(mod_key("Skyrim.esm")),
        ]);
        assert!(matches!(result, Err(LoadOrderError::MissingMaster { .. })));
    }

    #[test]
    fn test_parse_toml_fixture() {
        let toml = r#"
[[plugins]]
mod_key = "Skyrim.esm"

[[plugins.records]]
type = "magic_effect"
form_key = "012FCD:Skyrim.esm"
base_cost = 0.7
cast_type = "concentration"
magic_skill = "destruction"
minimum_skill_level = 0

[[plugins]]
mod_key = "Tomes.esp"
masters = ["Skyrim.esm"]
"#;
        let document: LoadOrderDocument = crate::config::parse_toml(toml).unwrap();
        let load_order = LoadOrder::new(document.plugins).unwrap();
        assert_eq!(load_order.len(), 2);
        assert!(load_order.lookup(&key("012FCD:Skyrim.esm")).is_some());
    }
}
