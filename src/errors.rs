//! Error types and validation functions for Hurst parameter estimation.
//!
//! Every failure in the pipeline is terminal: there is no partial result, so each
//! stage returns [`FractalResult`] and the caller decides how to report it.

use thiserror::Error;

/// Error types for the rescaled-range estimation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FractalAnalysisError {
    /// Malformed price or return input (too short, non-finite, non-positive).
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// Too few returns to build a chunk pyramid of usable depth.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// A chunk holds fewer than two elements, so its sample deviation is undefined.
    #[error("Degenerate chunk at level {level}, partition {index}: size {size} < 2")]
    DegenerateChunk {
        /// Pyramid level of the chunk
        level: usize,
        /// Partition index within the level
        index: usize,
        /// Number of elements in the chunk
        size: usize,
    },

    /// A chunk is constant, so its rescaled range would divide by zero.
    #[error("Zero variance in chunk at level {level}, partition {index}")]
    ZeroVariance {
        /// Pyramid level of the chunk
        level: usize,
        /// Partition index within the level
        index: usize,
    },

    /// A value feeding a logarithm is zero or negative.
    #[error("Cannot take logarithm of {quantity} at level {level}: {value} <= 0")]
    NonPositiveLog {
        /// Which quantity was being logged
        quantity: String,
        /// Pyramid level of the offending value
        level: usize,
        /// Offending value, rendered as text to keep decimal digits intact
        value: String,
    },

    /// The regression predictor has no spread.
    #[error("Degenerate regression: {reason}")]
    DegenerateRegression {
        /// Detail of the degeneracy
        reason: String,
    },

    /// Invalid parameter value in the estimator configuration.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Numerical computation error (decimal overflow, unrepresentable value).
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for numerical failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },
}

/// Result type for estimation operations.
///
/// This is a convenience type alias for operations that may fail with [`FractalAnalysisError`].
pub type FractalResult<T> = Result<T, FractalAnalysisError>;

/// Validates that data has sufficient length for analysis.
///
/// # Example
/// ```rust
/// use fractal_params::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2).is_ok());
/// assert!(validate_data_length(&data, 5).is_err());
/// ```
pub fn validate_data_length(data: &[f64], min_required: usize) -> FractalResult<()> {
    if data.len() < min_required {
        Err(FractalAnalysisError::InsufficientData {
            required: min_required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first non-finite value, naming its index.
///
/// # Example
/// ```rust
/// use fractal_params::errors::validate_all_finite;
///
/// assert!(validate_all_finite(&[1.0, 2.0, 3.0], "test").is_ok());
/// assert!(validate_all_finite(&[1.0, f64::NAN, 3.0], "test").is_err());
/// ```
pub fn validate_all_finite(data: &[f64], name: &str) -> FractalResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        let value_desc = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };

        return Err(FractalAnalysisError::InvalidInput {
            reason: format!(
                "{} contains non-finite value at index {}: {}",
                name, i, value_desc
            ),
        });
    }

    Ok(())
}

/// Validates a chronological price series: at least two finite, strictly positive values.
pub fn validate_positive_prices(prices: &[f64]) -> FractalResult<()> {
    if prices.len() < 2 {
        return Err(FractalAnalysisError::InvalidInput {
            reason: format!("price series needs at least 2 values, got {}", prices.len()),
        });
    }

    validate_all_finite(prices, "prices")?;

    if let Some((i, &price)) = prices.iter().enumerate().find(|(_, &p)| p <= 0.0) {
        return Err(FractalAnalysisError::InvalidInput {
            reason: format!("prices must be positive, got {} at index {}", price, i),
        });
    }

    Ok(())
}
