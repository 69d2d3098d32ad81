//! MagicEffect - the shared definition an effect entry points at

use crate::types::{ActorValue, CastType, FormKey};
use serde::{Deserialize, Serialize};

/// Base definition of a magic effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicEffect {
    pub form_key: FormKey,
    #[serde(default)]
    pub editor_id: Option<String>,
    /// Cost multiplier before magnitude and duration scaling
    pub base_cost: f32,
    pub cast_type: CastType,
    /// Governing skill
    pub magic_skill: ActorValue,
    /// Skill needed to cast; normally one of 0, 25, 50, 75, 100
    #[serde(default)]
    pub minimum_skill_level: i32,
}

impl MagicEffect {
    pub fn new(
        form_key: FormKey,
        base_cost: f32,
        cast_type: CastType,
        magic_skill: ActorValue,
        minimum_skill_level: i32,
    ) -> Self {
        MagicEffect {
            form_key,
            editor_id: None,
            base_cost,
            cast_type,
            magic_skill,
            minimum_skill_level,
        }
    }
}
