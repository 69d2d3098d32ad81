//! PatchMod - output plugin accumulating overrides for one run

use crate::record::{MajorRecord, Record, RecordKind};
use crate::source::Plugin;
use crate::types::{FormKey, ModKey};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Failure while requesting an override
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Cannot override {form_key} as {requested}: patch already holds it as {existing}")]
    OverrideConflict {
        form_key: FormKey,
        existing: RecordKind,
        requested: RecordKind,
    },
}

/// Output plugin; at most one override per form key
#[derive(Debug, Clone, Serialize)]
pub struct PatchMod {
    mod_key: ModKey,
    /// Overrides in the order they were first requested
    records: Vec<Record>,
    #[serde(skip)]
    index: HashMap<FormKey, usize>,
}

impl PatchMod {
    pub fn new(mod_key: ModKey) -> Self {
        PatchMod {
            mod_key,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn mod_key(&self) -> &ModKey {
        &self.mod_key
    }

    /// Fail if the patch already holds `record`'s form key as another kind
    pub fn check_override<R: MajorRecord>(&self, record: &R) -> Result<(), PatchError> {
        match self.get(record.form_key()) {
            Some(existing) if existing.kind() != R::KIND => Err(PatchError::OverrideConflict {
                form_key: record.form_key().clone(),
                existing: existing.kind(),
                requested: R::KIND,
            }),
            _ => Ok(()),
        }
    }

    /// Get the existing override for `record`, or copy it in as a new one
    ///
    /// Repeated requests for the same form key return the same instance.
    pub fn get_or_add_override<R: MajorRecord>(&mut self, record: &R) -> Result<&mut R, PatchError> {
        self.check_override(record)?;
        let form_key = record.form_key();
        let idx = match self.index.get(form_key).copied() {
            Some(idx) => idx,
            None => {
                self.records.push(record.clone().into_record());
                let idx = self.records.len() - 1;
                self.index.insert(form_key.clone(), idx);
                idx
            }
        };

        let existing = &mut self.records[idx];
        let existing_kind = existing.kind();
        R::from_record_mut(existing).ok_or_else(|| PatchError::OverrideConflict {
            form_key: record.form_key().clone(),
            existing: existing_kind,
            requested: R::KIND,
        })
    }

    /// Override held for a form key, if any
    pub fn get(&self, key: &FormKey) -> Option<&Record> {
        self.index.get(key).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert into a plain plugin, listing the origin plugins of overridden records as masters
    pub fn into_plugin(self) -> Plugin {
        let mut masters: Vec<ModKey> = Vec::new();
        for record in &self.records {
            let origin = &record.form_key().mod_key;
            if origin != &self.mod_key && !masters.contains(origin) {
                masters.push(origin.clone());
            }
        }
        Plugin {
            mod_key: self.mod_key,
            masters,
            records: self.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Book, Spell};

    fn key(s: &str) -> FormKey {
        s.parse().unwrap()
    }

    fn patch() -> PatchMod {
        PatchMod::new(ModKey::from_file_name("SpellTomeLevels.esp").unwrap())
    }

    #[test]
    fn test_repeated_requests_share_one_override() {
        let mut patch = patch();
        let spell = Spell::new(key("000B01:Skyrim.esm"), "Flames");

        patch.get_or_add_override(&spell).unwrap().name = Some("Skyrim: Flames".to_string());
        let again = patch.get_or_add_override(&spell).unwrap();

        // Second request sees the first request's edit
        assert_eq!(again.name.as_deref(), Some("Skyrim: Flames"));
        assert_eq!(patch.len(), 1);
    }

    #[test]
    fn test_kind_conflict_is_an_error() {
        let mut patch = patch();
        patch
            .get_or_add_override(&Spell::new(key("000B01:Skyrim.esm"), "Flames"))
            .unwrap();

        let result = patch.get_or_add_override(&Book::new(key("000B01:Skyrim.esm"), "Flames"));
        assert_eq!(
            result.unwrap_err(),
            PatchError::OverrideConflict {
                form_key: key("000B01:Skyrim.esm"),
                existing: RecordKind::Spell,
                requested: RecordKind::Book,
            }
        );
    }

    #[test]
    fn test_check_override_leaves_patch_unchanged() {
        let mut patch = patch();
        let book = Book::new(key("000B02:Skyrim.esm"), "Spell Tome: Frostbite");
        patch.check_override(&book).unwrap();
        assert!(patch.is_empty());

        patch.get_or_add_override(&book).unwrap();
        let spell = Spell::new(key("000B02:Skyrim.esm"), "Frostbite");
        assert!(patch.check_override(&spell).is_err());
        assert!(patch.check_override(&book).is_ok());
        assert_eq!(patch.len(), 1);
    }

    #[test]
    fn test_into_plugin_collects_masters() {
        let mut patch = patch();
        patch
            .get_or_add_override(&Spell::new(key("000B01:Skyrim.esm"), "Flames"))
            .unwrap();
        patch
            .get_or_add_override(&Book::new(key("000800:Tomes.esp"), "Tome"))
            .unwrap();
        patch
            .get_or_add_override(&Book::new(key("000A01:Skyrim.esm"), "Tome"))
            .unwrap();

        let plugin = patch.into_plugin();
        assert_eq!(plugin.records.len(), 3);
        assert_eq!(
            plugin.masters,
            vec![
                ModKey::from_file_name("Skyrim.esm").unwrap(),
                ModKey::from_file_name("Tomes.esp").unwrap()
            ]
        );
    }
}
