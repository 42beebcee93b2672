//! Tooltip renderers.
//!
//! Both renderers share the `@Name@` / `@Name*Multiplier@` placeholder syntax and
//! the allow-list sanitizer; they differ in where placeholder values come from:
//!
//! - [`ability`]: a [`VariableTable`](crate::variables::VariableTable) lookup,
//!   showing every star level at once
//! - [`traits`]: an [`EffectTally`](tally::EffectTally) consumed left to right

pub mod ability;
pub mod icons;
pub mod postscript;
pub mod sanitize;
pub mod tally;
pub mod traits;

pub use ability::{AbilityRenderer, render_ability};
pub use icons::{ScalingIcon, ScalingIcons};
pub use sanitize::Sanitizer;
pub use tally::{EffectTally, TallyError};
pub use traits::{TraitDocument, TraitLevel, render_trait};

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ErrorSeverity, TooltipError};

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that abort a single render.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Only one of the two postscript blocks is present.
    #[error("postscript block <{block}> is missing")]
    MissingPostscriptBlock { block: &'static str },

    /// Postscript blocks split into different numbers of lines.
    #[error("mismatched postscript block: {left} left lines, {right} right lines")]
    MismatchedPostscript { left: usize, right: usize },

    /// A multiplier was attached to a zero-width prefix/postfix marker.
    #[error("multiplier applied to marker placeholder '{placeholder}'")]
    MultiplierOnMarker { placeholder: String },

    /// Placeholder is not a variable, unit property or generated variable.
    #[error("unresolved placeholder '{placeholder}'")]
    UnresolvedPlaceholder { placeholder: String },

    /// Trait tally did not line up with the template.
    #[error(transparent)]
    Tally(#[from] TallyError),
}

impl TooltipError for RenderError {
    fn severity(&self) -> ErrorSeverity {
        use RenderError::*;
        match self {
            MissingPostscriptBlock { .. } | MismatchedPostscript { .. } => {
                ErrorSeverity::Internal
            }
            MultiplierOnMarker { .. } | Tally(_) => ErrorSeverity::Internal,
            UnresolvedPlaceholder { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RenderError::*;
        match self {
            MissingPostscriptBlock { .. } => "RENDER_MISSING_POSTSCRIPT",
            MismatchedPostscript { .. } => "RENDER_MISMATCHED_POSTSCRIPT",
            MultiplierOnMarker { .. } => "RENDER_MULTIPLIER_ON_MARKER",
            UnresolvedPlaceholder { .. } => "RENDER_UNRESOLVED_PLACEHOLDER",
            Tally(err) => err.error_code(),
        }
    }
}

// ============================================================================
// Placeholders
// ============================================================================

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([^@\n]*?)(?:\*(\d+(?:\.\d+)?))?@").expect("placeholder pattern is valid")
});

/// One `@Name@` or `@Name*Multiplier@` occurrence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placeholder<'t> {
    /// Full match, including the `@` delimiters.
    pub raw: &'t str,
    pub name: &'t str,
    pub multiplier: Option<f64>,
}

impl Placeholder<'_> {
    /// Multiplier, or 1 when absent.
    pub fn factor(&self) -> f64 {
        self.multiplier.unwrap_or(1.0)
    }

    pub(crate) fn unresolved(&self) -> RenderError {
        RenderError::UnresolvedPlaceholder {
            placeholder: self.raw.to_owned(),
        }
    }
}

/// Replaces every placeholder in `text` with `resolve`'s output.
///
/// Matches are leftmost-first and non-overlapping; text produced by `resolve` is
/// never rescanned.
pub fn interpolate<F>(text: &str, mut resolve: F) -> Result<String, RenderError>
where
    F: FnMut(&Placeholder<'_>) -> Result<String, RenderError>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let multiplier = match caps.get(2) {
            Some(m) => Some(m.as_str().parse::<f64>().map_err(|_| {
                RenderError::UnresolvedPlaceholder {
                    placeholder: whole.as_str().to_owned(),
                }
            })?),
            None => None,
        };

        let placeholder = Placeholder {
            raw: whole.as_str(),
            name,
            multiplier,
        };

        out.push_str(&text[last..whole.start()]);
        out.push_str(&resolve(&placeholder)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

/// Rounds half to even, the same way upstream tooling rounds.
pub fn round_value(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// One number when every level agrees, else `a / b / c`.
pub fn format_levels(values: &[i64]) -> String {
    match values.split_first() {
        Some((first, rest)) if rest.iter().all(|value| value == first) => first.to_string(),
        _ => values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(" / "),
    }
}
