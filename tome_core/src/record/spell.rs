//! Spell - a named list of magic effect entries

use super::MagicEffect;
use crate::types::{FormKey, FormLink};
use serde::{Deserialize, Serialize};

/// Instance data of one effect entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectData {
    pub magnitude: f32,
    /// Seconds; 0 means instant or constant
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub area: u32,
}

/// One effect entry of a spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub base_effect: FormLink<MagicEffect>,
    #[serde(default)]
    pub data: Option<EffectData>,
}

impl SpellEffect {
    pub fn new(base_effect: FormKey, magnitude: f32, duration: u32) -> Self {
        SpellEffect {
            base_effect: FormLink::new(base_effect),
            data: Some(EffectData {
                magnitude,
                duration,
                area: 0,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub form_key: FormKey,
    #[serde(default)]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub effects: Vec<SpellEffect>,
}

impl Spell {
    pub fn new(form_key: FormKey, name: impl Into<String>) -> Self {
        Spell {
            form_key,
            editor_id: None,
            name: Some(name.into()),
            effects: Vec::new(),
        }
    }

    /// Add an effect entry
    pub fn with_effect(mut self, effect: SpellEffect) -> Self {
        self.effects.push(effect);
        self
    }
}
