//! Stat id → (stat key, growth factor) table.

use strum::IntoEnumIterator;

use crate::level::LevelArray;

/// A unit stat that spell formulas can scale with.
///
/// Ids and growth factors mirror the upstream game data. Ids that are not listed
/// here are not scalable and make the referencing calculation fail.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum StatKind {
    Armor,
    Damage,
    AttackSpeed,
    SpellBlock,
    Health,
}

impl StatKind {
    /// Resolves an upstream `mStat` id.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::iter().find(|kind| kind.id() == id)
    }

    /// Upstream numeric identifier.
    pub const fn id(self) -> u32 {
        match self {
            Self::Armor => 1,
            Self::Damage => 2,
            Self::AttackSpeed => 3,
            Self::SpellBlock => 5,
            Self::Health => 11,
        }
    }

    /// Key of the level-1 value in a unit's stat table.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Armor => "baseArmor",
            Self::Damage => "baseDamage",
            Self::AttackSpeed => "attackSpeed",
            Self::SpellBlock => "baseSpellBlock",
            Self::Health => "baseHP",
        }
    }

    /// Multiplicative growth per level.
    pub const fn growth(self) -> f64 {
        match self {
            Self::Damage => 1.5,
            Self::Health => 1.8,
            Self::Armor | Self::AttackSpeed | Self::SpellBlock => 1.0,
        }
    }

    /// `base × growth^level`. Level 0 returns `base` unchanged.
    pub fn scale(self, base: f64, level: usize) -> f64 {
        // Levels are bounded by the level array length, far below i32::MAX.
        base * self.growth().powi(level as i32)
    }

    /// Scaled value at every level.
    pub fn curve(self, base: f64) -> LevelArray {
        LevelArray::from_fn(|level| self.scale(base, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LEVEL_SLOTS;

    #[test]
    fn table_matches_upstream_ids() {
        let ids: Vec<u32> = StatKind::iter().map(StatKind::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 11]);

        assert_eq!(StatKind::from_id(2), Some(StatKind::Damage));
        assert_eq!(StatKind::from_id(11).map(StatKind::key), Some("baseHP"));
        assert_eq!(StatKind::from_id(4), None);
        assert_eq!(StatKind::from_id(0), None);
    }

    #[test]
    fn level_zero_is_unscaled() {
        for kind in StatKind::iter() {
            assert_eq!(kind.scale(123.0, 0), 123.0);
        }
    }

    #[test]
    fn growth_is_monotonic_above_one() {
        for kind in StatKind::iter().filter(|kind| kind.growth() > 1.0) {
            let curve = kind.curve(50.0);
            for level in 1..LEVEL_SLOTS {
                assert!(curve[level] > curve[level - 1], "{kind} at level {level}");
            }
        }
    }

    #[test]
    fn damage_curve() {
        let curve = StatKind::Damage.curve(100.0);
        assert_eq!(curve[1], 150.0);
        assert_eq!(curve[2], 225.0);
        assert_eq!(curve[3], 337.5);
    }
}
