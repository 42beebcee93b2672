//! Trait documents and trait tooltip rendering.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::TooltipConfig;
use crate::render::sanitize::Sanitizer;
use crate::render::tally::{EffectTally, MAX_UNITS, MIN_UNITS};
use crate::render::{Placeholder, RenderError, interpolate, round_value};

/// Style name marking a single-unit trait.
pub const UNIQUE_STYLE: &str = "kUnique";

static EXPAND_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<expandRow>(.*)</expandRow>").expect("expand row pattern is valid")
});

// ============================================================================
// Document
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectAmount {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub format_string: String,
}

impl EffectAmount {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            format_string: String::new(),
        }
    }
}

/// Effects active regardless of unit count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InnateTraitSet {
    #[serde(default)]
    pub effect_amounts: Vec<EffectAmount>,
}

/// One activation tier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalTraitSet {
    pub min_units: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_units: Option<u32>,
    #[serde(default)]
    pub style_name: String,
    #[serde(default)]
    pub effect_amounts: Vec<EffectAmount>,
}

/// Trait definition as published by the game data export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitDocument {
    #[serde(default)]
    pub trait_id: String,
    #[serde(default)]
    pub display_name: String,
    /// Set identifier, e.g. `TFTSet11`.
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub icon_path: String,
    pub tooltip_text: String,
    #[serde(default)]
    pub innate_trait_sets: Vec<InnateTraitSet>,
    #[serde(default)]
    pub conditional_trait_sets: Vec<ConditionalTraitSet>,
}

/// Activation threshold and its display style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitLevel {
    pub min_units: u32,
    pub style_name: String,
}

impl TraitDocument {
    /// Tiers ordered by threshold. Equal thresholds keep document order.
    pub fn levels(&self) -> Vec<TraitLevel> {
        let mut levels: Vec<TraitLevel> = self
            .conditional_trait_sets
            .iter()
            .map(|tier| TraitLevel {
                min_units: tier.min_units,
                style_name: tier.style_name.clone(),
            })
            .collect();
        levels.sort_by_key(|level| level.min_units);
        levels
    }

    /// True when any tier uses the unique style.
    pub fn is_unique(&self) -> bool {
        self.conditional_trait_sets
            .iter()
            .any(|tier| tier.style_name == UNIQUE_STYLE)
    }

    /// True when the document belongs to `set_id`.
    pub fn in_set(&self, set_id: &str) -> bool {
        self.set.contains(set_id)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Repeats the `<expandRow>` body once per tier.
pub fn expand_rows(text: &str, tiers: usize) -> String {
    let Some(caps) = EXPAND_ROW.captures(text) else {
        return text.to_owned();
    };
    let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
        return text.to_owned();
    };

    let rows = vec![format!("<br><row>{}</row>", body.as_str()); tiers].join("\n");

    let mut out = String::with_capacity(text.len() + rows.len());
    out.push_str(&text[..whole.start()]);
    out.push_str(&rows);
    out.push_str(&text[whole.end()..]);
    out
}

fn resolve(placeholder: &Placeholder<'_>, tally: &mut EffectTally) -> Result<String, RenderError> {
    let name = placeholder.name;
    let value = if name.eq_ignore_ascii_case("MinUnits") {
        tally.consume(MIN_UNITS)?
    } else if name.eq_ignore_ascii_case("MaxUnits") {
        tally.consume(MAX_UNITS)?
    } else if name
        .to_lowercase()
        .starts_with(TooltipConfig::UNIT_PROPERTY_PREFIX)
    {
        0.0
    } else {
        tally.consume(name)?
    };

    Ok(round_value(value * placeholder.factor()).to_string())
}

/// Renders the sanitized tooltip for `document`.
pub fn render_trait(document: &TraitDocument) -> Result<String, RenderError> {
    let mut tally = EffectTally::from_trait(document);

    let html = expand_rows(&document.tooltip_text, document.conditional_trait_sets.len());
    let html = interpolate(&html, |placeholder| resolve(placeholder, &mut tally))?;
    let html = html
        .replace("<row>", r#"<span class="conditional-effect">"#)
        .replace("</row>", "</span>");

    let html = Sanitizer::TRAIT.sanitize(&format!(r#"<div class="trait-tooltip">{html}</div>"#));
    tracing::debug!("rendered trait '{}' ({} bytes)", document.trait_id, html.len());
    Ok(html)
}
