//! LevelTier - five discrete buckets of minimum skill level

use serde::{Deserialize, Serialize};

/// Minimum skill levels the base game uses for its tiers
pub const ALLOWED_MINIMUM_SKILL_LEVELS: [i32; 5] = [0, 25, 50, 75, 100];

/// Skill tier index, always in `0..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LevelTier(u8);

impl LevelTier {
    pub const MAX: u8 = 4;

    /// Bucket a minimum skill level: `level / 25`, clamped into `0..=4`
    pub fn from_minimum_skill_level(level: i32) -> Self {
        LevelTier((level / 25).clamp(0, Self::MAX as i32) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Pick this tier's entry from a five-element name table
    pub fn name<'a>(&self, names: &'a [String; 5]) -> &'a str {
        &names[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_levels() {
        let tiers: Vec<usize> = ALLOWED_MINIMUM_SKILL_LEVELS
            .iter()
            .map(|&l| LevelTier::from_minimum_skill_level(l).index())
            .collect();
        assert_eq!(tiers, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_levels_clamp() {
        assert_eq!(LevelTier::from_minimum_skill_level(-30).index(), 0);
        assert_eq!(LevelTier::from_minimum_skill_level(-10).index(), 0);
        assert_eq!(LevelTier::from_minimum_skill_level(24).index(), 0);
        assert_eq!(LevelTier::from_minimum_skill_level(99).index(), 3);
        assert_eq!(LevelTier::from_minimum_skill_level(125).index(), 4);
        assert_eq!(LevelTier::from_minimum_skill_level(i32::MAX).index(), 4);
    }

    #[test]
    fn test_name_lookup() {
        let names = ["Novice", "Apprentice", "Adept", "Expert", "Master"].map(String::from);
        assert_eq!(LevelTier::from_minimum_skill_level(50).name(&names), "Adept");
        assert_eq!(LevelTier::from_minimum_skill_level(250).name(&names), "Master");
    }
}
