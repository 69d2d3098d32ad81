//! Plugin - one layer of record definitions and overrides

use crate::record::{MajorRecord, Record};
use crate::types::ModKey;
use serde::{Deserialize, Serialize};

/// A single data source in the load order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub mod_key: ModKey,
    /// Plugins this one depends on; must load before it
    #[serde(default)]
    pub masters: Vec<ModKey>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Plugin {
    /// Create an empty plugin
    pub fn new(mod_key: ModKey) -> Self {
        Plugin {
            mod_key,
            masters: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn with_master(mut self, master: ModKey) -> Self {
        self.masters.push(master);
        self
    }

    /// Add a record (new definition or override)
    pub fn with_record<R: MajorRecord>(mut self, record: R) -> Self {
        self.records.push(record.into_record());
        self
    }
}
