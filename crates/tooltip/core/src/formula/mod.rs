//! Spell formula system.
//!
//! A spell document carries named raw data values and named calculations. Each
//! calculation is a small expression tree over data values, constants and unit stats,
//! evaluated into one [`LevelArray`](crate::level::LevelArray) per calculation.
//!
//! ## Examples
//!
//! ```ignore
//! // Damage ratio scaled by the unit's attack damage
//! CalculationPart::StatByNamedValue { stat: 2, name: "ADRatio".into() }
//!
//! // Base damage + 20
//! CalculationPart::SumOfParts {
//!     parts: vec![
//!         CalculationPart::NamedValue { name: "BaseDamage".into() },
//!         CalculationPart::Number { value: 20.0 },
//!     ],
//! }
//! ```

pub mod error;
pub mod evaluate;

pub use error::FormulaError;
pub use evaluate::{Evaluation, FormulaEvaluator, evaluate};

use std::collections::BTreeMap;

use serde::Deserialize as _;
use serde_json::Value;

// ============================================================================
// Calculation Tree
// ============================================================================

/// One node of a calculation tree, tagged by `__type` upstream.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "__type")]
pub enum CalculationPart {
    /// Constant at every level.
    #[serde(rename = "NumberCalculationPart")]
    Number {
        #[serde(rename = "mNumber", default)]
        value: f64,
    },

    /// Element-wise sum of children.
    #[serde(rename = "SumOfSubPartsCalculationPart")]
    SumOfParts {
        #[serde(rename = "mSubparts", default)]
        parts: Vec<CalculationPart>,
    },

    /// Element-wise product of two children.
    #[serde(rename = "ProductOfSubPartsCalculationPart")]
    ProductOfParts {
        #[serde(rename = "mPart1")]
        part1: Box<CalculationPart>,
        #[serde(rename = "mPart2")]
        part2: Box<CalculationPart>,
    },

    /// Child scaled by a unit stat at each level.
    #[serde(rename = "StatBySubPartCalculationPart")]
    StatByPart {
        #[serde(rename = "mStat", default)]
        stat: u32,
        #[serde(rename = "mSubpart")]
        part: Box<CalculationPart>,
    },

    /// Named data value scaled by a unit stat at each level.
    #[serde(rename = "StatByNamedDataValueCalculationPart")]
    StatByNamedValue {
        #[serde(rename = "mStat", default)]
        stat: u32,
        #[serde(rename = "mDataValue")]
        name: String,
    },

    /// Named data value, verbatim.
    #[serde(rename = "NamedDataValueCalculationPart")]
    NamedValue {
        #[serde(rename = "mDataValue")]
        name: String,
    },

    /// Child times a constant ratio.
    #[serde(rename = "SubPartScaledProportionalToStat")]
    ScaledProportionalToStat {
        #[serde(rename = "mSubpart")]
        part: Box<CalculationPart>,
        #[serde(rename = "mRatio")]
        ratio: f64,
    },

    /// Result of another calculation in the same document.
    #[serde(rename = "{f3cbe7b2}")]
    RecursiveReference {
        #[serde(rename = "mSpellCalculationKey")]
        target: String,
    },

    /// Any tag not listed above.
    #[serde(other)]
    Unknown,
}

/// Top-level calculation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "__type")]
pub enum SpellCalculation {
    /// Sum of the formula parts, times the optional multiplier.
    #[serde(rename = "GameCalculation")]
    Direct {
        #[serde(rename = "mFormulaParts", default)]
        parts: Vec<CalculationPart>,
        #[serde(rename = "mMultiplier", default)]
        multiplier: Option<CalculationPart>,
    },

    /// Another calculation of the same document, times a multiplier.
    #[serde(rename = "GameCalculationModified")]
    ModifiedReference {
        #[serde(rename = "mModifiedGameCalculation")]
        base: String,
        #[serde(rename = "mMultiplier")]
        multiplier: CalculationPart,
    },

    #[serde(other)]
    Unknown,
}

// ============================================================================
// Spell Document
// ============================================================================

/// Raw named data value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataValue {
    #[serde(rename = "mName")]
    pub name: String,
    /// Missing upstream for some entries; those never reach the variable table.
    #[serde(rename = "mValues", default)]
    pub values: Option<Vec<f64>>,
}

impl DataValue {
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: Some(values.into()),
        }
    }
}

/// The `mSpell` record of a unit.
///
/// Calculations are kept as raw JSON so that one malformed entry fails on its own
/// when evaluated instead of rejecting the whole document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpellDocument {
    #[serde(rename = "mDataValues", default)]
    pub data_values: Vec<DataValue>,
    #[serde(rename = "mSpellCalculations", default)]
    pub calculations: BTreeMap<String, Value>,
}

impl SpellDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a data value (builder pattern).
    #[must_use]
    pub fn with_data_value(mut self, value: DataValue) -> Self {
        self.data_values.push(value);
        self
    }

    /// Adds a calculation (builder pattern).
    #[must_use]
    pub fn with_calculation(mut self, name: impl Into<String>, calculation: Value) -> Self {
        self.calculations.insert(name.into(), calculation);
        self
    }

    /// Finds a calculation by name, exact match first, then case-insensitive.
    pub fn calculation_entry(&self, name: &str) -> Option<(&str, &Value)> {
        self.calculations
            .get_key_value(name)
            .or_else(|| {
                self.calculations
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
            })
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Decodes one calculation.
    pub fn calculation(&self, name: &str) -> Result<SpellCalculation, FormulaError> {
        let (key, raw) = self
            .calculation_entry(name)
            .ok_or_else(|| FormulaError::UnknownCalculation {
                name: name.to_owned(),
            })?;
        SpellCalculation::deserialize(raw).map_err(|err| FormulaError::Malformed {
            calculation: key.to_owned(),
            reason: err.to_string(),
        })
    }
}
