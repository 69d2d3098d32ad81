//! Winning override enumeration

use super::{Plugin, RecordStore};
use crate::record::{MajorRecord, Record};
use crate::types::{FormKey, ModKey};
use std::collections::HashSet;
use std::marker::PhantomData;

/// The winning version of a record and the plugin that supplied it
#[derive(Debug)]
pub struct WinningContext<'a, R> {
    pub record: &'a R,
    /// Plugin holding the winning version (not necessarily the record's origin)
    pub mod_key: &'a ModKey,
}

impl<R> Clone for WinningContext<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for WinningContext<'_, R> {}

/// Iterator over the winning version of every record of kind `R`
///
/// Walks plugins from highest to lowest priority, records in file order, and
/// yields each form key the first time it is seen.
pub struct WinningOverrides<'a, R> {
    plugins: std::iter::Rev<std::slice::Iter<'a, Plugin>>,
    current: Option<(&'a ModKey, std::slice::Iter<'a, Record>)>,
    seen: HashSet<&'a FormKey>,
    kind: PhantomData<fn() -> R>,
}

impl<'a, R: MajorRecord + 'a> Iterator for WinningOverrides<'a, R> {
    type Item = WinningContext<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((mod_key, records)) = &mut self.current {
                for record in records.by_ref() {
                    if !self.seen.insert(record.form_key()) {
                        continue;
                    }
                    if let Some(record) = R::from_record(record) {
                        return Some(WinningContext {
                            record,
                            mod_key: *mod_key,
                        });
                    }
                }
            }
            let plugin = self.plugins.next()?;
            self.current = Some((&plugin.mod_key, plugin.records.iter()));
        }
    }
}

/// Enumerate the winning override of every record of kind `R` in the store
pub fn winning_overrides<'a, R: MajorRecord + 'a, S: RecordStore + ?Sized>(
    store: &'a S,
) -> WinningOverrides<'a, R> {
    WinningOverrides {
        plugins: store.plugins().iter().rev(),
        current: None,
        seen: HashSet::new(),
        kind: PhantomData,
    }
}
