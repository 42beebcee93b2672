//! Finished tooltip records.
//!
//! These tie the evaluator and the renderers together for callers that just want
//! the output for one ability or one trait.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ErrorSeverity, TooltipError};
use crate::formula::{FormulaError, SpellDocument, evaluate};
use crate::render::{AbilityRenderer, RenderError, TraitDocument, TraitLevel, render_trait};
use crate::stats::StatTable;
use crate::variables::VariableTable;

// ============================================================================
// Ability
// ============================================================================

/// Rendered ability tooltip plus the table it was rendered from.
#[derive(Clone, Debug, Serialize)]
pub struct AbilityTooltip {
    pub html: String,
    pub variables: VariableTable,
    /// Calculations left out of `variables`.
    #[serde(skip)]
    pub failures: BTreeMap<String, FormulaError>,
}

/// Evaluates `spell` for `stats` and renders `template` with the default renderer.
pub fn render_ability_tooltip(
    spell: &SpellDocument,
    stats: &StatTable,
    template: &str,
) -> Result<AbilityTooltip, RenderError> {
    render_ability_tooltip_with(&AbilityRenderer::default(), spell, stats, template)
}

pub fn render_ability_tooltip_with(
    renderer: &AbilityRenderer,
    spell: &SpellDocument,
    stats: &StatTable,
    template: &str,
) -> Result<AbilityTooltip, RenderError> {
    let mut evaluation = evaluate(spell, stats);
    let failures = std::mem::take(&mut evaluation.failures);
    let variables = evaluation.into_variable_table();

    let html = renderer.render(template, &variables)?;
    tracing::debug!(
        "rendered ability tooltip: {} variables, {} failed calculations",
        variables.len(),
        failures.len()
    );

    Ok(AbilityTooltip {
        html,
        variables,
        failures,
    })
}

// ============================================================================
// Trait
// ============================================================================

/// Rendered trait tooltip with its activation levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraitTooltip {
    pub trait_id: String,
    pub display_name: String,
    pub tooltip_html: String,
    pub levels: Vec<TraitLevel>,
}

pub fn render_trait_tooltip(document: &TraitDocument) -> Result<TraitTooltip, RenderError> {
    Ok(TraitTooltip {
        trait_id: document.trait_id.clone(),
        display_name: document.display_name.clone(),
        tooltip_html: render_trait(document)?,
        levels: document.levels(),
    })
}

// ============================================================================
// Damage Type
// ============================================================================

/// Primary damage type of a character, taken from its role name prefix.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
pub enum DamageType {
    #[strum(serialize = "AP")]
    AbilityPower,
    #[strum(serialize = "AD")]
    AttackDamage,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DamageTypeError {
    #[error("role '{name}' has no AP/AD prefix")]
    UnknownRole { name: String },
}

impl TooltipError for DamageTypeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "DAMAGE_TYPE_UNKNOWN_ROLE"
    }
}

impl DamageType {
    /// Classifies a role name such as `APCaster` or `ADFighter`.
    pub fn from_role_name(name: &str) -> Result<Self, DamageTypeError> {
        if name.starts_with("AP") {
            Ok(Self::AbilityPower)
        } else if name.starts_with("AD") {
            Ok(Self::AttackDamage)
        } else {
            Err(DamageTypeError::UnknownRole {
                name: name.to_owned(),
            })
        }
    }

    pub const fn is_ap(self) -> bool {
        matches!(self, Self::AbilityPower)
    }

    pub const fn is_ad(self) -> bool {
        matches!(self, Self::AttackDamage)
    }
}
