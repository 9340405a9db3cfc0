//! Volatility and drift of the fractional diffusion implied by a Hurst exponent.
//!
//! ```text
//! volatility = var(returns, ddof = 1) / sqrt(|Δt|^(2H))
//! drift      = mean(returns) / Δt + volatility² / 2
//! ```
//!
//! These run in plain `f64`; only the rescaled-range stage uses decimal arithmetic.

use crate::errors::{validate_all_finite, FractalAnalysisError, FractalResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Volatility and drift of the assumed process
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffusionParameters {
    /// Hurst-scaled volatility
    pub volatility: f64,
    /// Deterministic trend per unit time
    pub drift: f64,
}

/// Compensated (Kahan) sum.
pub fn kahan_sum(values: &[f64]) -> f64 {
    let (total, _) = values.iter().fold((0.0_f64, 0.0_f64), |(total, carry), &value| {
        let adjusted = value - carry;
        let next = total + adjusted;
        (next, (next - total) - adjusted)
    });
    total
}

/// Arithmetic mean using compensated summation.
pub fn mean(values: &[f64]) -> FractalResult<f64> {
    if values.is_empty() {
        return Err(FractalAnalysisError::InvalidInput {
            reason: "mean of an empty series".to_string(),
        });
    }
    Ok(kahan_sum(values) / values.len() as f64)
}

/// Bessel-corrected sample variance (Welford's algorithm).
pub fn sample_variance(values: &[f64]) -> FractalResult<f64> {
    if values.len() < 2 {
        return Err(FractalAnalysisError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }

    Ok((m2 / (values.len() - 1) as f64).max(0.0))
}

/// Volatility and drift for Hurst exponent `hurst` and time step `time_step`.
///
/// The sample variance needs at least two returns, so a single return fails
/// with `InsufficientData` and an empty series with `InvalidInput`. The
/// rescaled-range pipeline never reaches this with fewer than ten.
pub fn estimate_diffusion_parameters(
    hurst: f64,
    returns: &[f64],
    time_step: f64,
) -> FractalResult<DiffusionParameters> {
    if returns.is_empty() {
        return Err(FractalAnalysisError::InvalidInput {
            reason: "return series is empty".to_string(),
        });
    }
    validate_all_finite(returns, "returns")?;
    if !hurst.is_finite() {
        return Err(FractalAnalysisError::NumericalError {
            reason: format!("Hurst exponent is not finite: {}", hurst),
            operation: Some("estimate_diffusion_parameters".to_string()),
        });
    }
    if !time_step.is_finite() || time_step == 0.0 {
        return Err(FractalAnalysisError::InvalidParameter {
            parameter: "time_step".to_string(),
            value: time_step,
            constraint: "finite and non-zero".to_string(),
        });
    }

    let variance = sample_variance(returns)?;
    let scaling = time_step.abs().powf(2.0 * hurst).sqrt();
    let volatility = variance / scaling;
    let drift = mean(returns)? / time_step + volatility * volatility / 2.0;

    if !volatility.is_finite() || !drift.is_finite() {
        return Err(FractalAnalysisError::NumericalError {
            reason: format!(
                "non-finite diffusion parameters: volatility={}, drift={}",
                volatility, drift
            ),
            operation: Some("estimate_diffusion_parameters".to_string()),
        });
    }

    Ok(DiffusionParameters { volatility, drift })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const RETURNS: [f64; 6] = [0.01, -0.02, 0.015, 0.005, -0.01, 0.02];

    #[test]
    fn test_sample_variance_matches_two_pass() {
        let m = RETURNS.iter().sum::<f64>() / RETURNS.len() as f64;
        let expected = RETURNS.iter().map(|r| (r - m).powi(2)).sum::<f64>() / (RETURNS.len() - 1) as f64;
        assert_approx_eq!(sample_variance(&RETURNS).unwrap(), expected, 1e-15);
        assert_approx_eq!(sample_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 2.5, 1e-12);
    }

    #[test]
    fn test_brownian_unit_step_volatility_is_variance() {
        let params = estimate_diffusion_parameters(0.5, &RETURNS, 1.0).unwrap();
        let variance = sample_variance(&RETURNS).unwrap();
        assert_approx_eq!(params.volatility, variance, 1e-12);
        let expected_drift = mean(&RETURNS).unwrap() + variance * variance / 2.0;
        assert_approx_eq!(params.drift, expected_drift, 1e-12);
    }

    #[test]
    fn test_unit_step_ignores_hurst() {
        let a = estimate_diffusion_parameters(0.2, &RETURNS, 1.0).unwrap();
        let b = estimate_diffusion_parameters(0.8, &RETURNS, 1.0).unwrap();
        assert_approx_eq!(a.volatility, b.volatility, 1e-15);
    }

    #[test]
    fn test_time_step_scaling() {
        let h = 0.7;
        let dt = 1.0 / 252.0;
        let params = estimate_diffusion_parameters(h, &RETURNS, dt).unwrap();
        let variance = sample_variance(&RETURNS).unwrap();
        let expected_vol = variance / dt.powf(h);
        assert_approx_eq!(params.volatility, expected_vol, 1e-12);
        let expected_drift = mean(&RETURNS).unwrap() / dt + expected_vol.powi(2) / 2.0;
        assert_approx_eq!(params.drift, expected_drift, 1e-12);
    }

    #[test]
    fn test_negative_time_step_uses_magnitude_for_scaling() {
        let pos = estimate_diffusion_parameters(0.6, &RETURNS, 2.0).unwrap();
        let neg = estimate_diffusion_parameters(0.6, &RETURNS, -2.0).unwrap();
        assert_approx_eq!(pos.volatility, neg.volatility, 1e-15);
    }

    #[test]
    fn test_empty_returns_are_invalid() {
        assert!(matches!(
            estimate_diffusion_parameters(0.5, &[], 1.0),
            Err(FractalAnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_single_return_has_no_sample_variance() {
        assert!(matches!(
            estimate_diffusion_parameters(0.5, &[0.01], 1.0),
            Err(FractalAnalysisError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_zero_time_step_rejected() {
        assert!(matches!(
            estimate_diffusion_parameters(0.5, &RETURNS, 0.0),
            Err(FractalAnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_kahan_sum_precision() {
        let values = vec![1.0, 1e-16, 1e-16, 1e-16, 1e-16];
        let naive: f64 = values.iter().sum();
        assert_eq!(naive, 1.0);
        assert!(kahan_sum(&values) > 1.0);
        assert_approx_eq!(kahan_sum(&values), 1.0 + 4e-16, 1e-16);
    }
}
