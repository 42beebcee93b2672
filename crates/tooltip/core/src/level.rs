//! Per-level numeric arrays.
//!
//! Every computed quantity is a [`LevelArray`]: one `f64` per character level from 0
//! to [`TooltipConfig::MAX_LEVEL`]. Slot 0 is never shown; it exists so that slot
//! indices equal levels, matching the upstream data layout.
//!
//! The length is fixed by the type, so `sum`/`product` can never see mismatched
//! operands. Untrusted arrays go through [`LevelArray::try_from`], which rejects any
//! other length.

use core::ops::{Add, Index, Mul};

use crate::config::TooltipConfig;
use crate::error::{ErrorSeverity, TooltipError};

/// Number of slots in a level array.
pub const LEVEL_SLOTS: usize = TooltipConfig::LEVEL_SLOTS;

/// Fixed-length per-level values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct LevelArray([f64; LEVEL_SLOTS]);

/// Conversion from an untrusted array failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("level array needs {expected} values, got {actual}")]
pub struct LevelError {
    pub expected: usize,
    pub actual: usize,
}

impl TooltipError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "LEVEL_ARRAY_LENGTH"
    }
}

impl LevelArray {
    pub const fn new(values: [f64; LEVEL_SLOTS]) -> Self {
        Self(values)
    }

    /// Same value at every level.
    pub const fn splat(value: f64) -> Self {
        Self([value; LEVEL_SLOTS])
    }

    pub const fn zeros() -> Self {
        Self::splat(0.0)
    }

    pub const fn ones() -> Self {
        Self::splat(1.0)
    }

    /// Builds an array by calling `f` with each level.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(core::array::from_fn(f))
    }

    /// Element-wise sum.
    pub fn sum(&self, other: &Self) -> Self {
        Self::from_fn(|level| self.0[level] + other.0[level])
    }

    /// Element-wise product.
    pub fn product(&self, other: &Self) -> Self {
        Self::from_fn(|level| self.0[level] * other.0[level])
    }

    /// Multiplies every slot by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_fn(|level| self.0[level] * factor)
    }

    pub fn get(&self, level: usize) -> Option<f64> {
        self.0.get(level).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl Default for LevelArray {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<usize> for LevelArray {
    type Output = f64;

    fn index(&self, level: usize) -> &f64 {
        &self.0[level]
    }
}

impl Add for LevelArray {
    type Output = LevelArray;

    fn add(self, rhs: Self) -> Self {
        self.sum(&rhs)
    }
}

impl Mul for LevelArray {
    type Output = LevelArray;

    fn mul(self, rhs: Self) -> Self {
        self.product(&rhs)
    }
}

impl From<[f64; LEVEL_SLOTS]> for LevelArray {
    fn from(values: [f64; LEVEL_SLOTS]) -> Self {
        Self(values)
    }
}

impl TryFrom<Vec<f64>> for LevelArray {
    type Error = LevelError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl TryFrom<&[f64]> for LevelArray {
    type Error = LevelError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        <[f64; LEVEL_SLOTS]>::try_from(values)
            .map(Self)
            .map_err(|_| LevelError {
                expected: LEVEL_SLOTS,
                actual: values.len(),
            })
    }
}

impl From<LevelArray> for Vec<f64> {
    fn from(array: LevelArray) -> Self {
        array.0.to_vec()
    }
}
