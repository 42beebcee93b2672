//! Formula evaluation errors.
//!
//! All of these describe defects in upstream data. The evaluator isolates them per
//! named calculation; none of them abort a whole document.

use crate::error::{ErrorSeverity, TooltipError};

/// Errors that can occur while evaluating one calculation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// Calculation JSON does not match any known shape.
    #[error("calculation '{calculation}' is malformed: {reason}")]
    Malformed { calculation: String, reason: String },

    /// A node carried a tag the evaluator does not know.
    #[error("calculation '{calculation}' uses an unknown formula part")]
    UnknownFormula { calculation: String },

    /// A formula referenced a stat id missing from the scaling table.
    #[error("stat id {id} is not scalable")]
    UnknownStat { id: u32 },

    /// The unit's stat table has no value for a scalable stat.
    #[error("unit has no '{key}' stat")]
    MissingStat { key: &'static str },

    /// A formula referenced a data value that is absent or unusable.
    #[error("unknown data value '{name}'")]
    UnknownDataValue { name: String },

    /// A reference named a calculation the document does not have.
    #[error("unknown calculation '{name}'")]
    UnknownCalculation { name: String },

    /// A reference chain came back to a calculation already being evaluated.
    #[error("calculation '{name}' references itself")]
    CyclicReference { name: String },

    /// A direct calculation had no formula parts.
    #[error("calculation '{calculation}' has no formula parts")]
    EmptyFormula { calculation: String },
}

impl TooltipError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use FormulaError::*;
        match self {
            Malformed { .. } => "FORMULA_MALFORMED",
            UnknownFormula { .. } => "FORMULA_UNKNOWN_PART",
            UnknownStat { .. } => "FORMULA_UNKNOWN_STAT",
            MissingStat { .. } => "FORMULA_MISSING_STAT",
            UnknownDataValue { .. } => "FORMULA_UNKNOWN_DATA_VALUE",
            UnknownCalculation { .. } => "FORMULA_UNKNOWN_CALCULATION",
            CyclicReference { .. } => "FORMULA_CYCLIC_REFERENCE",
            EmptyFormula { .. } => "FORMULA_EMPTY",
        }
    }
}
