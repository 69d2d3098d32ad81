//! Record sources - plugins layered by load order, and the lookup traits over them

mod load_order;
mod plugin;
mod winning;

pub use load_order::{LoadOrder, LoadOrderError};
pub use plugin::Plugin;
pub use winning::{winning_overrides, WinningContext, WinningOverrides};

use crate::record::Record;
use crate::types::{FormKey, ModKey};
use std::collections::HashMap;

/// Read-only resolution of form keys to their winning record
pub trait LinkCache: Send + Sync {
    /// Winning version of the record with this key, if any plugin defines it
    fn lookup(&self, key: &FormKey) -> Option<&Record>;
}

/// A link cache that also exposes the plugins it was built from
pub trait RecordStore: LinkCache {
    /// Plugins in load order, lowest priority first
    fn plugins(&self) -> &[Plugin];

    /// Whether a plugin is present in the load order
    fn has_mod(&self, mod_key: &ModKey) -> bool {
        self.plugins().iter().any(|p| &p.mod_key == mod_key)
    }
}

impl LinkCache for HashMap<FormKey, Record> {
    fn lookup(&self, key: &FormKey) -> Option<&Record> {
        self.get(key)
    }
}
