//! Prelude module for convenient imports
//!
//! ```rust
//! use tome_core::prelude::*;
//! ```

// Identifiers
pub use crate::types::{ActorValue, CastType, FormKey, FormLink, ModKey, ModType};

// Records
pub use crate::record::{Book, BookTeaches, MagicEffect, MajorRecord, Record, ScriptEntry, ScriptPropertyValue, Spell, SpellEffect};

// Sources
pub use crate::source::{winning_overrides, LinkCache, LoadOrder, Plugin, RecordStore};

// Pipeline
pub use crate::config::Settings;
pub use crate::patch::PatchMod;
pub use crate::patcher::{run_patch, PatchReport, SkipReason};
