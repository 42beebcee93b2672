//! Formula evaluation logic.
//!
//! Walks each named calculation of a [`SpellDocument`] against the unit's
//! [`StatTable`] and produces one [`LevelArray`] per calculation.

use std::collections::BTreeMap;

use crate::error::TooltipError;
use crate::formula::{CalculationPart, FormulaError, SpellCalculation, SpellDocument};
use crate::level::LevelArray;
use crate::stats::{StatKind, StatTable};
use crate::variables::VariableTable;

/// Ratio upstream uses for "per point of ability power". Ability power is always 100
/// and is not modelled, so `ratio × AP` is 1 and the ratio is skipped.
const ABILITY_POWER_RATIO: f64 = 0.01;

// ============================================================================
// Evaluation Result
// ============================================================================

/// Outcome of evaluating every calculation in a document.
#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    /// Raw data values of the document.
    pub data: VariableTable,
    /// Successfully evaluated calculations, by original name.
    pub calculations: BTreeMap<String, LevelArray>,
    /// Calculations that failed, by original name. Absent from `calculations`.
    pub failures: BTreeMap<String, FormulaError>,
}

impl Evaluation {
    /// Raw data values merged with calculation results, calculations last.
    pub fn into_variable_table(self) -> VariableTable {
        let mut table = self.data;
        table.extend(
            self.calculations
                .iter()
                .map(|(name, values)| (name.as_str(), *values)),
        );
        table
    }
}

/// Evaluate every calculation of `document`.
///
/// ## Error Handling
/// Failures are isolated per calculation: the failing name is logged, recorded in
/// [`Evaluation::failures`] and left out of the results.
pub fn evaluate(document: &SpellDocument, stats: &StatTable) -> Evaluation {
    FormulaEvaluator::new(document, stats).evaluate_all()
}

// ============================================================================
// Evaluator
// ============================================================================

/// Evaluates calculations of one document for one unit.
pub struct FormulaEvaluator<'a> {
    document: &'a SpellDocument,
    stats: &'a StatTable,
    data: VariableTable,
}

impl<'a> FormulaEvaluator<'a> {
    pub fn new(document: &'a SpellDocument, stats: &'a StatTable) -> Self {
        Self {
            document,
            stats,
            data: VariableTable::from_data_values(&document.data_values),
        }
    }

    /// Evaluate every calculation, isolating failures.
    pub fn evaluate_all(self) -> Evaluation {
        let mut calculations = BTreeMap::new();
        let mut failures = BTreeMap::new();

        for name in self.document.calculations.keys() {
            match self.evaluate_calculation(name) {
                Ok(values) => {
                    tracing::debug!("calculation '{}' = {:?}", name, values.as_slice());
                    calculations.insert(name.clone(), values);
                }
                Err(err) => {
                    tracing::warn!(
                        "skipping calculation '{}' [{}]: {}",
                        name,
                        err.error_code(),
                        err
                    );
                    failures.insert(name.clone(), err);
                }
            }
        }

        Evaluation {
            data: self.data,
            calculations,
            failures,
        }
    }

    /// Evaluate a single named calculation, following references.
    pub fn evaluate_calculation(&self, name: &str) -> Result<LevelArray, FormulaError> {
        let mut stack = Vec::new();
        self.calculation(name, &mut stack)
    }

    fn calculation(&self, name: &str, stack: &mut Vec<String>) -> Result<LevelArray, FormulaError> {
        let key = name.to_lowercase();
        if stack.contains(&key) {
            return Err(FormulaError::CyclicReference {
                name: name.to_owned(),
            });
        }

        let calculation = self.document.calculation(name)?;
        stack.push(key);
        let result = self.spell_calculation(name, &calculation, stack);
        stack.pop();
        result
    }

    fn spell_calculation(
        &self,
        name: &str,
        calculation: &SpellCalculation,
        stack: &mut Vec<String>,
    ) -> Result<LevelArray, FormulaError> {
        match calculation {
            SpellCalculation::Direct { parts, multiplier } => {
                if parts.is_empty() {
                    return Err(FormulaError::EmptyFormula {
                        calculation: name.to_owned(),
                    });
                }

                let mut values = LevelArray::zeros();
                for part in parts {
                    values = values.sum(&self.part(name, part, stack)?);
                }

                let multiplier = match multiplier {
                    Some(part) => self.part(name, part, stack)?,
                    None => LevelArray::ones(),
                };
                Ok(values.product(&multiplier))
            }

            SpellCalculation::ModifiedReference { base, multiplier } => {
                let multiplier = self.part(name, multiplier, stack)?;
                let base = self.calculation(base, stack)?;
                Ok(base.product(&multiplier))
            }

            SpellCalculation::Unknown => Err(FormulaError::UnknownFormula {
                calculation: name.to_owned(),
            }),
        }
    }

    /// Evaluate one node. `calculation` is the enclosing calculation, for errors.
    fn part(
        &self,
        calculation: &str,
        part: &CalculationPart,
        stack: &mut Vec<String>,
    ) -> Result<LevelArray, FormulaError> {
        match part {
            CalculationPart::Number { value } => Ok(LevelArray::splat(*value)),

            CalculationPart::SumOfParts { parts } => {
                let mut total = LevelArray::zeros();
                for child in parts {
                    total = total.sum(&self.part(calculation, child, stack)?);
                }
                Ok(total)
            }

            CalculationPart::ProductOfParts { part1, part2 } => {
                let left = self.part(calculation, part1, stack)?;
                let right = self.part(calculation, part2, stack)?;
                Ok(left.product(&right))
            }

            CalculationPart::StatByPart { stat, part } => {
                let curve = self.stat_curve(*stat)?;
                let values = self.part(calculation, part, stack)?;
                Ok(curve.product(&values))
            }

            CalculationPart::StatByNamedValue { stat, name } => {
                let curve = self.stat_curve(*stat)?;
                let values = self.data_value(name)?;
                Ok(curve.product(&values))
            }

            CalculationPart::NamedValue { name } => self.data_value(name),

            CalculationPart::ScaledProportionalToStat { part, ratio } => {
                let values = self.part(calculation, part, stack)?;
                if *ratio == ABILITY_POWER_RATIO {
                    // Would need the hidden always-100 ability power stat; 0.01 × 100 = 1.
                    Ok(values)
                } else {
                    Ok(values.scale(*ratio))
                }
            }

            CalculationPart::RecursiveReference { target } => self.calculation(target, stack),

            CalculationPart::Unknown => Err(FormulaError::UnknownFormula {
                calculation: calculation.to_owned(),
            }),
        }
    }

    fn data_value(&self, name: &str) -> Result<LevelArray, FormulaError> {
        self.data
            .get(name)
            .copied()
            .ok_or_else(|| FormulaError::UnknownDataValue {
                name: name.to_owned(),
            })
    }

    /// Unit stat scaled per level.
    fn stat_curve(&self, id: u32) -> Result<LevelArray, FormulaError> {
        let kind = StatKind::from_id(id).ok_or(FormulaError::UnknownStat { id })?;
        let base = self
            .stats
            .get(kind.key())
            .ok_or(FormulaError::MissingStat { key: kind.key() })?;
        Ok(kind.curve(base))
    }
}
