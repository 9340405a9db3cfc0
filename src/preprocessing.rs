//! Price to log-return conversion.
//!
//! Prices arrive oldest first. The returns are derived once and never mutated
//! afterwards; every later stage borrows them.

use crate::errors::{validate_all_finite, validate_positive_prices, FractalAnalysisError, FractalResult};

/// Logarithmic returns `ln(p[i+1] / p[i])` of a chronological price series.
///
/// The series needs at least two strictly positive, finite prices.
///
/// # Example
/// ```rust
/// use fractal_params::preprocessing::log_returns;
///
/// let returns = log_returns(&[100.0, 110.0, 99.0]).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!((returns[0] - (1.1f64).ln()).abs() < 1e-15);
/// ```
pub fn log_returns(prices: &[f64]) -> FractalResult<Vec<f64>> {
    validate_positive_prices(prices)?;

    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Rebuild a price path from its first price and log-returns.
///
/// `price[i+1] = price[i] * exp(return[i])`; the inverse of [`log_returns`].
pub fn reconstruct_prices(initial_price: f64, returns: &[f64]) -> FractalResult<Vec<f64>> {
    if !initial_price.is_finite() || initial_price <= 0.0 {
        return Err(FractalAnalysisError::InvalidInput {
            reason: format!("initial price must be positive and finite, got {}", initial_price),
        });
    }
    validate_all_finite(returns, "returns")?;

    let mut prices = Vec::with_capacity(returns.len() + 1);
    prices.push(initial_price);
    let mut current = initial_price;
    for &r in returns {
        current *= r.exp();
        prices.push(current);
    }
    Ok(prices)
}
