//! Rescaled-range pipeline entry point.
//!
//! prices → log-returns → chunk pyramid → per-chunk R/S → level averages →
//! log-log slope (Hurst exponent) → volatility and drift.
//!
//! All inputs arrive as arguments; nothing persists between runs.

use crate::chunking::ChunkPyramid;
use crate::config::EstimatorConfig;
use crate::decimal_ops::{decimal_to_f64, DecimalContext};
use crate::errors::{validate_all_finite, FractalResult};
use crate::preprocessing::log_returns;
use crate::regions::summarize_regions;
use crate::regression::{least_squares_slope, log_points};
use crate::rescaled_range::pyramid_statistics;
use crate::results::HurstAnalysis;
use crate::volatility::estimate_diffusion_parameters;

/// Runs the rescaled-range estimation with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct HurstEstimator {
    config: EstimatorConfig,
}

impl HurstEstimator {
    /// Estimator with a validated configuration.
    pub fn new(config: EstimatorConfig) -> FractalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate from a chronological price series (oldest first).
    pub fn estimate_prices(&self, prices: &[f64]) -> FractalResult<HurstAnalysis> {
        let returns = log_returns(prices)?;
        self.estimate_returns(&returns)
    }

    /// Estimate from log-returns directly.
    pub fn estimate_returns(&self, returns: &[f64]) -> FractalResult<HurstAnalysis> {
        self.config.validate()?;
        validate_all_finite(returns, "returns")?;
        let ctx = DecimalContext::from_config(&self.config)?;

        let pyramid = ChunkPyramid::new(returns)?;
        let levels = pyramid_statistics(&pyramid, &ctx)?;
        let regions = summarize_regions(&levels, returns.len(), &ctx)?;
        let log_points = log_points(&regions, &ctx)?;
        let hurst_exponent = decimal_to_f64(least_squares_slope(&log_points, &ctx)?)?;

        if hurst_exponent <= 0.0 || hurst_exponent >= 1.0 {
            log::warn!(
                "Hurst exponent {} outside (0, 1) for {} returns; short series make R/S unstable",
                hurst_exponent,
                returns.len()
            );
        }

        let parameters = estimate_diffusion_parameters(hurst_exponent, returns, self.config.time_step)?;

        log::debug!(
            "H={} volatility={} drift={} (depth {}, dt {})",
            hurst_exponent,
            parameters.volatility,
            parameters.drift,
            pyramid.depth(),
            self.config.time_step
        );

        Ok(HurstAnalysis {
            series_len: returns.len(),
            depth: pyramid.depth(),
            levels,
            regions,
            log_points,
            hurst_exponent,
            parameters,
        })
    }
}

/// Estimate Hurst exponent, volatility and drift from prices with time step `time_step`.
///
/// # Example
/// ```rust
/// use fractal_params::estimate_hurst_parameters;
///
/// let prices = [100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 106.0, 110.0, 108.0, 112.0, 111.0];
/// let analysis = estimate_hurst_parameters(&prices, 1.0).unwrap();
/// assert_eq!(analysis.depth, 2);
/// assert!(analysis.hurst_exponent.is_finite());
/// ```
pub fn estimate_hurst_parameters(prices: &[f64], time_step: f64) -> FractalResult<HurstAnalysis> {
    HurstEstimator::new(EstimatorConfig::with_time_step(time_step))?.estimate_prices(prices)
}

/// Estimate from log-returns with time step `time_step`.
pub fn estimate_from_returns(returns: &[f64], time_step: f64) -> FractalResult<HurstAnalysis> {
    HurstEstimator::new(EstimatorConfig::with_time_step(time_step))?.estimate_returns(returns)
}
