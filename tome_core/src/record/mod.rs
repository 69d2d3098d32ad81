//! Record model - the closed set of record kinds the patcher reads and writes

mod book;
mod magic_effect;
mod spell;

pub use book::{Book, BookTeaches, ScriptEntry, ScriptProperty, ScriptPropertyValue, VirtualMachineAdapter};
pub use magic_effect::MagicEffect;
pub use spell::{EffectData, Spell, SpellEffect};

use crate::types::FormKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Book,
    Spell,
    MagicEffect,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Book => "BOOK",
            RecordKind::Spell => "SPEL",
            RecordKind::MagicEffect => "MGEF",
        };
        f.write_str(name)
    }
}

/// Any record stored in a plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Book(Book),
    Spell(Spell),
    MagicEffect(MagicEffect),
}

impl Record {
    pub fn form_key(&self) -> &FormKey {
        match self {
            Record::Book(r) => &r.form_key,
            Record::Spell(r) => &r.form_key,
            Record::MagicEffect(r) => &r.form_key,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Book(_) => RecordKind::Book,
            Record::Spell(_) => RecordKind::Spell,
            Record::MagicEffect(_) => RecordKind::MagicEffect,
        }
    }
}

/// A concrete record kind that can be looked up from, and stored as, a [`Record`]
pub trait MajorRecord: Clone + Sized {
    const KIND: RecordKind;

    fn form_key(&self) -> &FormKey;

    fn from_record(record: &Record) -> Option<&Self>;

    fn from_record_mut(record: &mut Record) -> Option<&mut Self>;

    fn into_record(self) -> Record;
}

macro_rules! impl_major_record {
    ($ty:ident, $kind:ident) => {
        impl MajorRecord for $ty {
            const KIND: RecordKind = RecordKind::$kind;

            fn form_key(&self) -> &FormKey {
                &self.form_key
            }

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$kind(r) => Some(r),
                    _ => None,
                }
            }

            fn from_record_mut(record: &mut Record) -> Option<&mut Self> {
                match record {
                    Record::$kind(r) => Some(r),
                    _ => None,
                }
            }

            fn into_record(self) -> Record {
                Record::$kind(self)
            }
        }
    };
}

impl_major_record!(Book, Book);
impl_major_record!(Spell, Spell);
impl_major_record!(MagicEffect, MagicEffect);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActorValue, CastType};

    #[test]
    fn test_downcast_matches_kind() {
        let key: FormKey = "000801:Tomes.esp".parse().unwrap();
        let record = MagicEffect::new(key.clone(), 1.0, CastType::FireAndForget, ActorValue::Illusion, 0)
            .into_record();

        assert_eq!(record.kind(), RecordKind::MagicEffect);
        assert_eq!(record.form_key(), &key);
        assert!(MagicEffect::from_record(&record).is_some());
        assert!(Spell::from_record(&record).is_none());
        assert!(Book::from_record(&record).is_none());
    }

    #[test]
    fn test_record_tagged_serde() {
        let json = r#"{
            "type": "spell",
            "form_key": "000802:Tomes.esp",
            "name": "Flames",
            "effects": []
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind(), RecordKind::Spell);
        assert_eq!(record.kind().to_string(), "SPEL");
    }
}
