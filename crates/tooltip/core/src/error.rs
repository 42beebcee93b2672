//! Common error infrastructure for tooltip-core.
//!
//! Domain errors live next to the code that raises them (`LevelError` with level
//! arrays, `FormulaError` with the evaluator, `TallyError` and `RenderError` with the
//! renderers). This module holds the classification shared by all of them.
//!
//! # Classes
//!
//! - **Data-shape** errors come from upstream game data (unknown part tag, missing
//!   field, unknown stat id). The evaluator isolates them per calculation.
//! - **Template-contract** errors (unequal postscript blocks, tally exhaustion, a
//!   multiplier on a zero-width marker) abort the single render.
//! - **Unresolvable placeholders** abort the single render.

/// Severity level of an error, used for logging priority and recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Malformed upstream data. Isolated to the quantity that needed it.
    ///
    /// Examples: unknown calculation part, data value of the wrong length
    Validation,

    /// A contract between two pipeline stages was broken.
    ///
    /// Examples: tally exhausted, postscript blocks of unequal length
    Internal,

    /// The render cannot produce honest output and must be abandoned.
    ///
    /// Examples: placeholder that resolves to nothing
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the failure only affects a single computed quantity.
    pub const fn is_isolated(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Common trait for all tooltip-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Carry the offending name or tag in the variant
/// - Return a stable, upper-case `error_code` per variant
pub trait TooltipError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
