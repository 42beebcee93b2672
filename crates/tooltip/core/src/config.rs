/// Tooltip configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Number of star levels shown in ability tooltips, starting at level 1.
    pub star_levels: usize,
    /// Icon source placeholder left in rendered ability HTML for the caller to fill.
    pub icon_placeholder: String,
}

impl TooltipConfig {
    // ===== compile-time constants =====
    /// Highest character level modelled by spell data.
    pub const MAX_LEVEL: usize = 6;
    /// Slots in a level array. Slot 0 is padding so indices match levels.
    pub const LEVEL_SLOTS: usize = Self::MAX_LEVEL + 1;
    /// Placeholder names starting with this (case-folded) render as `0`.
    pub const UNIT_PROPERTY_PREFIX: &'static str = "tftunitproperty";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STAR_LEVELS: usize = 3;
    pub const ABILITY_ICON_PLACEHOLDER: &'static str = "$ABILITY_ICON_SRC";

    pub fn new() -> Self {
        Self {
            star_levels: Self::DEFAULT_STAR_LEVELS,
            icon_placeholder: Self::ABILITY_ICON_PLACEHOLDER.to_owned(),
        }
    }

    /// Star levels clamped into `1..=MAX_LEVEL`.
    pub fn shown_levels(&self) -> core::ops::RangeInclusive<usize> {
        1..=self.star_levels.clamp(1, Self::MAX_LEVEL)
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shows_three_levels() {
        let config = TooltipConfig::default();
        assert_eq!(config.shown_levels(), 1..=3);
        assert_eq!(config.icon_placeholder, "$ABILITY_ICON_SRC");
    }

    #[test]
    fn star_levels_are_clamped() {
        let config = TooltipConfig {
            star_levels: 40,
            ..TooltipConfig::default()
        };
        assert_eq!(config.shown_levels(), 1..=TooltipConfig::MAX_LEVEL);

        let config = TooltipConfig {
            star_levels: 0,
            ..TooltipConfig::default()
        };
        assert_eq!(config.shown_levels(), 1..=1);
    }
}
