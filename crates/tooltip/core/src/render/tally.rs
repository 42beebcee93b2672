//! Effect tallies for trait tooltips.
//!
//! Trait templates reference effects by name only, so the N-th `@Name@` in a
//! template takes the N-th value pushed under that name. Bucket keys are
//! case-folded.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, TooltipError};
use crate::render::traits::{EffectAmount, TraitDocument};

/// Synthetic bucket holding each tier's unit threshold.
pub const MIN_UNITS: &str = "min_units";
/// Synthetic bucket holding each tier's upper unit bound, when present.
pub const MAX_UNITS: &str = "max_units";

/// Errors raised while consuming a tally.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    #[error("effect '{name}' exhausted after {tallied} values")]
    Exhausted { name: String, tallied: usize },

    #[error("no effect named '{name}'")]
    UnknownEffect { name: String },
}

impl TooltipError for TallyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "TALLY_EXHAUSTED",
            Self::UnknownEffect { .. } => "TALLY_UNKNOWN_EFFECT",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Bucket {
    values: Vec<f64>,
    cursor: usize,
}

/// Ordered values per effect name, consumed left to right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectTally {
    buckets: BTreeMap<String, Bucket>,
}

impl EffectTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills a tally from `document`.
    ///
    /// Order: innate effects, then per tier its `min_units`, its `max_units` (if
    /// any) and its effects. The synthetic buckets always exist.
    pub fn from_trait(document: &TraitDocument) -> Self {
        let mut tally = Self::new();

        for set in &document.innate_trait_sets {
            tally.push_effects(&set.effect_amounts);
        }

        tally.ensure(MIN_UNITS);
        tally.ensure(MAX_UNITS);
        for tier in &document.conditional_trait_sets {
            tally.push(MIN_UNITS, f64::from(tier.min_units));
            if let Some(max_units) = tier.max_units {
                tally.push(MAX_UNITS, f64::from(max_units));
            }
            tally.push_effects(&tier.effect_amounts);
        }

        tally
    }

    fn push_effects(&mut self, effects: &[EffectAmount]) {
        for effect in effects {
            if !effect.format_string.is_empty() {
                tracing::warn!(
                    "effect '{}' has unsupported format string '{}'",
                    effect.name,
                    effect.format_string
                );
            }
            let value = effect.value.unwrap_or_else(|| {
                tracing::warn!("effect '{}' has no value, tallying 0", effect.name);
                0.0
            });
            self.push(&effect.name, value);
        }
    }

    fn ensure(&mut self, name: &str) {
        self.buckets.entry(name.to_lowercase()).or_default();
    }

    /// Appends `value` to the bucket for `name`.
    pub fn push(&mut self, name: &str, value: f64) {
        self.buckets
            .entry(name.to_lowercase())
            .or_default()
            .values
            .push(value);
    }

    /// Takes the next value for `name`.
    pub fn consume(&mut self, name: &str) -> Result<f64, TallyError> {
        let bucket = self
            .buckets
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| TallyError::UnknownEffect {
                name: name.to_owned(),
            })?;

        let value = bucket
            .values
            .get(bucket.cursor)
            .copied()
            .ok_or_else(|| TallyError::Exhausted {
                name: name.to_owned(),
                tallied: bucket.values.len(),
            })?;
        bucket.cursor += 1;
        Ok(value)
    }

    /// Values left for `name`; zero for unknown names.
    pub fn remaining(&self, name: &str) -> usize {
        self.buckets
            .get(&name.to_lowercase())
            .map_or(0, |bucket| bucket.values.len() - bucket.cursor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(&name.to_lowercase())
    }
}
