//! tome_core - Spell tome labels derived from load-ordered plugin records
//!
//! This library provides:
//! - LoadOrder: Plugins layered by priority, with winning-override lookup
//! - Scoring: School and skill tier of a spell's dominant effect
//! - Naming: Placeholder templates for book and spell labels
//! - PatchMod: Output plugin accumulating one override per record
//! - Patcher: The per-book pipeline tying them together

pub mod config;
pub mod discovery;
pub mod naming;
pub mod patch;
pub mod patcher;
pub mod record;
pub mod scoring;
pub mod source;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use config::{default_settings, ConfigError, Settings};
pub use patch::{PatchError, PatchMod};
pub use patcher::{run_patch, BookOutcome, PatchReport, Patcher, RecordError, RenamedBook, RunError, SkipReason};
pub use record::{Book, MagicEffect, MajorRecord, Record, RecordKind, Spell, SpellEffect};
pub use scoring::{spell_info, LevelTier, SpellInfo};
pub use source::{winning_overrides, LinkCache, LoadOrder, LoadOrderError, Plugin, RecordStore, WinningContext};
pub use types::{ActorValue, CastType, FormKey, FormLink, MagicSchool, ModKey, ModType};
