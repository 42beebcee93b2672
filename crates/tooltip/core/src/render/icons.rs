//! Scaling icon substitution.
//!
//! Rendered text keeps `%i:scaleAP%` style markers. Callers that know where their
//! icon assets live swap them for `<img>` tags after rendering.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

/// Stat scaling icons referenced by `%i:<name>%` markers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum ScalingIcon {
    #[strum(serialize = "scaleAP")]
    AbilityPower,
    #[strum(serialize = "scaleAD")]
    AttackDamage,
    #[strum(serialize = "scaleAS")]
    AttackSpeed,
    #[strum(serialize = "scaleCrit")]
    Crit,
    #[strum(serialize = "scaleHealth")]
    Health,
    #[strum(serialize = "scaleMana")]
    Mana,
    #[strum(serialize = "scaleArmor")]
    Armor,
    #[strum(serialize = "scaleMR")]
    MagicResist,
}

impl ScalingIcon {
    /// Marker text, e.g. `%i:scaleAP%`.
    pub fn marker(self) -> String {
        format!("%i:{}%", self.as_ref())
    }
}

/// Icon sources keyed by icon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScalingIcons {
    sources: BTreeMap<ScalingIcon, String>,
}

impl ScalingIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, icon: ScalingIcon, src: impl Into<String>) -> Self {
        self.sources.insert(icon, src.into());
        self
    }

    pub fn get(&self, icon: ScalingIcon) -> Option<&str> {
        self.sources.get(&icon).map(String::as_str)
    }

    /// Replaces every marker that has a source. Markers without one are left as is.
    pub fn apply(&self, html: &str) -> String {
        let mut result = html.to_owned();
        for icon in ScalingIcon::iter() {
            if let Some(src) = self.get(icon) {
                let img = format!(r#"<img class="scaling-icon" src="{src}">"#);
                result = result.replace(&icon.marker(), &img);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn markers_use_game_names() {
        assert_eq!(ScalingIcon::AbilityPower.marker(), "%i:scaleAP%");
        assert_eq!(ScalingIcon::MagicResist.marker(), "%i:scaleMR%");
        assert_eq!(ScalingIcon::from_str("scaleCrit"), Ok(ScalingIcon::Crit));
        assert_eq!(ScalingIcon::iter().count(), 8);
    }

    #[test]
    fn replaces_known_markers_only() {
        let icons = ScalingIcons::new()
            .with(ScalingIcon::AbilityPower, "/icons/ap.png")
            .with(ScalingIcon::Health, "/icons/hp.png");

        let html = icons.apply("180%i:scaleAP% + 5%i:scaleHealth% %i:scaleMana%");
        assert_eq!(
            html,
            r#"180<img class="scaling-icon" src="/icons/ap.png"> + 5<img class="scaling-icon" src="/icons/hp.png"> %i:scaleMana%"#
        );
    }
}
