//! Fixed-precision decimal arithmetic for the rescaled-range statistics
//!
//! The per-chunk statistics are nested sums of sums: chunk means feed centered
//! cumulative sums, whose ranges feed level averages, whose logs feed the
//! regression. [`DecimalContext`] carries that arithmetic in `Decimal` and rounds
//! every result to a fixed number of significant digits, so each stage sees
//! the same working precision regardless of how deep the pyramid is.

use crate::config::{EstimatorConfig, MAX_SIGNIFICANT_DIGITS};
use crate::errors::{FractalAnalysisError, FractalResult};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

/// Arithmetic context rounding every result to `significant_digits`.
///
/// Ties round to even, matching the default decimal context rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    significant_digits: u32,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            significant_digits: crate::config::DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl DecimalContext {
    /// Context with the given precision; `1..=28` digits.
    pub fn new(significant_digits: u32) -> FractalResult<Self> {
        if significant_digits == 0 || significant_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(FractalAnalysisError::InvalidParameter {
                parameter: "significant_digits".to_string(),
                value: significant_digits as f64,
                constraint: format!("[1, {}]", MAX_SIGNIFICANT_DIGITS),
            });
        }
        Ok(Self { significant_digits })
    }

    /// Full `Decimal` precision; rounding only trims beyond 28 digits.
    pub fn exact() -> Self {
        Self {
            significant_digits: MAX_SIGNIFICANT_DIGITS,
        }
    }

    /// Context matching an estimator configuration.
    pub fn from_config(config: &EstimatorConfig) -> FractalResult<Self> {
        Self::new(config.significant_digits)
    }

    /// Working precision in significant digits
    pub fn significant_digits(&self) -> u32 {
        self.significant_digits
    }

    /// Round a value to the context precision.
    pub fn round(&self, value: Decimal) -> FractalResult<Decimal> {
        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        value
            .round_sf(self.significant_digits)
            .ok_or_else(|| numerical("round", format!("cannot round {} to {} digits", value, self.significant_digits)))
    }

    /// Rounded sum of two values
    pub fn add(&self, a: Decimal, b: Decimal) -> FractalResult<Decimal> {
        let result = a
            .checked_add(b)
            .ok_or_else(|| numerical("add", "Decimal overflow in addition".to_string()))?;
        self.round(result)
    }

    /// Rounded difference of two values
    pub fn sub(&self, a: Decimal, b: Decimal) -> FractalResult<Decimal> {
        let result = a
            .checked_sub(b)
            .ok_or_else(|| numerical("sub", "Decimal overflow in subtraction".to_string()))?;
        self.round(result)
    }

    /// Rounded product of two values
    pub fn mul(&self, a: Decimal, b: Decimal) -> FractalResult<Decimal> {
        let result = a
            .checked_mul(b)
            .ok_or_else(|| numerical("mul", "Decimal overflow in multiplication".to_string()))?;
        self.round(result)
    }

    /// Rounded quotient; division by zero is an error.
    pub fn div(&self, numerator: Decimal, denominator: Decimal) -> FractalResult<Decimal> {
        if denominator.is_zero() {
            return Err(numerical("div", format!("Division by zero: {} / 0", numerator)));
        }
        let result = numerator
            .checked_div(denominator)
            .ok_or_else(|| numerical("div", "Decimal overflow in division".to_string()))?;
        self.round(result)
    }

    /// Rounded square root of a non-negative value
    pub fn sqrt(&self, value: Decimal) -> FractalResult<Decimal> {
        let root = value
            .sqrt()
            .ok_or_else(|| numerical("sqrt", format!("square root of negative value {}", value)))?;
        self.round(root)
    }

    /// Rounded natural logarithm of a positive value
    pub fn ln(&self, value: Decimal) -> FractalResult<Decimal> {
        if value <= Decimal::ZERO {
            return Err(numerical("ln", format!("logarithm of non-positive value {}", value)));
        }
        let log = value
            .checked_ln()
            .ok_or_else(|| numerical("ln", format!("logarithm of {} is not representable", value)))?;
        self.round(log)
    }

    /// Running sum that rounds after each addition, starting from zero.
    pub fn sum<I>(&self, values: I) -> FractalResult<Decimal>
    where
        I: IntoIterator<Item = Decimal>,
    {
        values
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, value| self.add(acc, value))
    }

    /// Rounded arithmetic mean of a non-empty slice.
    pub fn mean(&self, values: &[Decimal]) -> FractalResult<Decimal> {
        if values.is_empty() {
            return Err(FractalAnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let total = self.sum(values.iter().copied())?;
        self.div(total, Decimal::from(values.len()))
    }
}

/// Lift a float into `Decimal` without context rounding.
pub fn decimal_from_f64(value: f64) -> FractalResult<Decimal> {
    if !value.is_finite() {
        return Err(numerical(
            "from_f64",
            format!("Cannot convert non-finite f64: {}", value),
        ));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| numerical("from_f64", format!("Failed to convert f64 {} to Decimal", value)))
}

/// Lower a `Decimal` result back to `f64`.
pub fn decimal_to_f64(value: Decimal) -> FractalResult<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| numerical("to_f64", format!("Decimal {} has no finite f64 form", value)))
}

fn numerical(operation: &str, reason: String) -> FractalAnalysisError {
    FractalAnalysisError::NumericalError {
        reason,
        operation: Some(operation.to_string()),
    }
}
