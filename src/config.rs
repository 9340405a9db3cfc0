//! # Estimator Configuration
//!
//! Controls the two knobs of the pipeline: the sampling time step Δt used by
//! the volatility/drift estimator, and the working precision of the decimal
//! arithmetic used for the rescaled-range statistics.

use crate::errors::{FractalAnalysisError, FractalResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of significant decimal digits for intermediate arithmetic.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 5;

/// Largest precision a `rust_decimal::Decimal` mantissa can carry.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 28;

/// Configuration for a single estimation run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstimatorConfig {
    /// Time step between observations (1.0 for daily data sampled daily)
    pub time_step: f64,
    /// Significant digits kept after every decimal operation
    pub significant_digits: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::daily()
    }
}

impl EstimatorConfig {
    /// Daily returns with a unit time step and 5-digit working precision
    pub fn daily() -> Self {
        Self {
            time_step: 1.0,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }

    /// Default precision with a custom time step
    pub fn with_time_step(time_step: f64) -> Self {
        Self {
            time_step,
            ..Self::daily()
        }
    }

    /// Override the working precision
    pub fn significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> FractalResult<()> {
        if !self.time_step.is_finite() || self.time_step == 0.0 {
            return Err(FractalAnalysisError::InvalidParameter {
                parameter: "time_step".to_string(),
                value: self.time_step,
                constraint: "finite and non-zero".to_string(),
            });
        }

        if self.significant_digits == 0 || self.significant_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(FractalAnalysisError::InvalidParameter {
                parameter: "significant_digits".to_string(),
                value: self.significant_digits as f64,
                constraint: format!("[1, {}]", MAX_SIGNIFICANT_DIGITS),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_daily() {
        let config = EstimatorConfig::default();
        assert_eq!(config.time_step, 1.0);
        assert_eq!(config.significant_digits, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_and_non_finite_time_step() {
        for dt in [0.0, f64::NAN, f64::INFINITY] {
            let result = EstimatorConfig::with_time_step(dt).validate();
            assert!(matches!(
                result,
                Err(FractalAnalysisError::InvalidParameter { ref parameter, .. }) if parameter == "time_step"
            ));
        }
    }

    #[test]
    fn test_negative_time_step_is_accepted() {
        // Only |Δt| enters the volatility scaling.
        assert!(EstimatorConfig::with_time_step(-0.5).validate().is_ok());
    }

    #[test]
    fn test_precision_bounds() {
        assert!(EstimatorConfig::daily().significant_digits(0).validate().is_err());
        assert!(EstimatorConfig::daily().significant_digits(29).validate().is_err());
        assert!(EstimatorConfig::daily().significant_digits(28).validate().is_ok());
    }
}
