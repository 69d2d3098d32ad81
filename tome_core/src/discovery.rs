//! Spell discovery - find the spell a tome teaches

use crate::record::{Book, BookTeaches, Spell};
use crate::source::LinkCache;
use crate::types::{FormLink, ModKey, ModType};

/// Script Better Spell Learning attaches to tomes it takes over
pub const SPELL_TOME_READ_SCRIPT: &str = "SpellTomeReadScript";

/// Object property on that script holding the taught spell
pub const SPELL_LEARNED_PROPERTY: &str = "SpellLearned";

/// Better Spell Learning plugin; its tomes teach through a script instead of `teaches`
pub fn better_spell_learning() -> ModKey {
    ModKey::new("Better Spell Learning", ModType::Plugin)
}

/// Resolve the spell a book teaches
///
/// Tries the book's own `teaches` field first, then (only when the companion
/// plugin is active) the spell referenced by its read script.
pub fn taught_spell<'a>(cache: &'a dyn LinkCache, book: &Book, companion_active: bool) -> Option<&'a Spell> {
    let direct = match &book.teaches {
        BookTeaches::Spell(link) => link.try_resolve(cache),
        BookTeaches::Skill(_) | BookTeaches::Perk(_) | BookTeaches::Nothing => None,
    };

    match direct {
        Some(spell) => Some(spell),
        None if companion_active => script_spell(cache, book),
        None => None,
    }
}

/// Spell referenced by the book's `SpellTomeReadScript.SpellLearned` property
pub fn script_spell<'a>(cache: &'a dyn LinkCache, book: &Book) -> Option<&'a Spell> {
    let key = book
        .virtual_machine_adapter
        .as_ref()?
        .script(SPELL_TOME_READ_SCRIPT)?
        .object_property(SPELL_LEARNED_PROPERTY)?;
    FormLink::<Spell>::new(key.clone()).try_resolve(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MajorRecord, Record, ScriptEntry, ScriptPropertyValue};
    use crate::types::{ActorValue, FormKey};
    use std::collections::HashMap;

    fn key(s: &str) -> FormKey {
        s.parse().unwrap()
    }

    fn cache() -> HashMap<FormKey, Record> {
        let mut cache = HashMap::new();
        for spell in [
            Spell::new(key("000B01:Skyrim.esm"), "Flames"),
            Spell::new(key("000B02:Skyrim.esm"), "Frostbite"),
        ] {
            cache.insert(spell.form_key.clone(), spell.into_record());
        }
        cache
    }

    fn scripted_book(target: &str) -> Book {
        Book::new(key("000A01:Skyrim.esm"), "Spell Tome: Frostbite").with_script(
            ScriptEntry::new(SPELL_TOME_READ_SCRIPT)
                .with_property(SPELL_LEARNED_PROPERTY, ScriptPropertyValue::Object(key(target))),
        )
    }

    #[test]
    fn test_direct_teaches() {
        let cache = cache();
        let book = Book::new(key("000A01:Skyrim.esm"), "Spell Tome: Flames").teaching(key("000B01:Skyrim.esm"));

        let spell = taught_spell(&cache, &book, false).unwrap();
        assert_eq!(spell.name.as_deref(), Some("Flames"));
    }

    #[test]
    fn test_skill_book_teaches_no_spell() {
        let cache = cache();
        let mut book = Book::new(key("000A01:Skyrim.esm"), "The Art of War Magic");
        book.teaches = BookTeaches::Skill(ActorValue::Destruction);

        assert!(taught_spell(&cache, &book, true).is_none());
    }

    #[test]
    fn test_script_path_requires_companion() {
        let cache = cache();
        let book = scripted_book("000B02:Skyrim.esm");

        assert!(taught_spell(&cache, &book, false).is_none());
        let spell = taught_spell(&cache, &book, true).unwrap();
        assert_eq!(spell.name.as_deref(), Some("Frostbite"));
    }

    #[test]
    fn test_direct_dangling_falls_back_to_script() {
        let cache = cache();
        let book = scripted_book("000B02:Skyrim.esm").teaching(key("000FFF:Skyrim.esm"));

        let spell = taught_spell(&cache, &book, true).unwrap();
        assert_eq!(spell.form_key, key("000B02:Skyrim.esm"));
    }

    #[test]
    fn test_script_reference_to_non_spell_is_unresolved() {
        let mut cache = cache();
        let other = Book::new(key("000A09:Skyrim.esm"), "Not a spell");
        cache.insert(other.form_key.clone(), other.into_record());

        assert!(script_spell(&cache, &scripted_book("000A09:Skyrim.esm")).is_none());
    }
}
