//! Spell scoring - pick the dominant effect of a spell and bucket its skill level

mod tier;

pub use tier::{LevelTier, ALLOWED_MINIMUM_SKILL_LEVELS};

use crate::record::{MagicEffect, Spell, SpellEffect};
use crate::source::LinkCache;
use crate::types::{ActorValue, CastType, MagicSchool};

/// Exponent applied to magnitude and duration when costing an effect
pub const COST_EXPONENT: f64 = 1.1;

/// Duration assumed for instant and constant effects
pub const INSTANT_DURATION: u32 = 10;

/// School and tier derived from a spell's dominant effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellInfo {
    /// Governing skill of the dominant effect, as carried by its definition
    pub school: ActorValue,
    pub level: LevelTier,
}

/// Display name of a school, or `"None"` for non-school skills
pub fn school_name(school: ActorValue) -> &'static str {
    MagicSchool::from_actor_value(school)
        .map(|s| s.name())
        .unwrap_or("None")
}

/// Duration scaling: flat for concentration spells, otherwise `duration^1.1`
pub fn duration_factor(cast_type: CastType, duration: u32) -> f64 {
    if cast_type == CastType::Concentration {
        return 1.0;
    }
    let duration = if duration == 0 { INSTANT_DURATION } else { duration };
    (duration as f64).powf(COST_EXPONENT)
}

/// Approximate casting cost of one effect entry against its definition
///
/// Returns `None` when the entry carries no instance data.
pub fn effect_cost(effect: &SpellEffect, base_effect: &MagicEffect) -> Option<f64> {
    let data = effect.data.as_ref()?;
    let magnitude = (data.magnitude as f64).powf(COST_EXPONENT);
    Some(base_effect.base_cost as f64 * magnitude * duration_factor(base_effect.cast_type, data.duration))
}

/// The effect definition with the highest cost, keeping the first on ties
///
/// Each new leader with a minimum skill level outside the usual set is logged.
pub fn dominant_effect<'a>(cache: &'a dyn LinkCache, spell: &Spell) -> Option<&'a MagicEffect> {
    let mut max_cost = -1.0;
    let mut dominant = None;

    for effect in &spell.effects {
        let Some(base_effect) = effect.base_effect.try_resolve(cache) else {
            continue;
        };
        let Some(cost) = effect_cost(effect, base_effect) else {
            continue;
        };
        if cost > max_cost {
            max_cost = cost;
            dominant = Some(base_effect);

            if !ALLOWED_MINIMUM_SKILL_LEVELS.contains(&base_effect.minimum_skill_level) {
                tracing::warn!(
                    magic_effect = %base_effect.form_key,
                    minimum_skill_level = base_effect.minimum_skill_level,
                    "Unexpected minimum skill level for magic effect"
                );
            }
        }
    }

    dominant
}

/// Derive school and tier for a spell, `None` if no effect could be costed
pub fn spell_info(cache: &dyn LinkCache, spell: &Spell) -> Option<SpellInfo> {
    let base_effect = dominant_effect(cache, spell)?;
    Some(SpellInfo {
        school: base_effect.magic_skill,
        level: LevelTier::from_minimum_skill_level(base_effect.minimum_skill_level),
    })
}
