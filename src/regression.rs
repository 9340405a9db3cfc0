//! Log-log least-squares fit of average rescaled range against average chunk length.
//!
//! The slope of `ln(R/S)` on `ln(n)` across pyramid levels is the Hurst exponent.

use crate::decimal_ops::DecimalContext;
use crate::errors::{FractalAnalysisError, FractalResult};
use crate::regions::RegionSummary;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `(ln length, ln R/S)` pair per pyramid level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogLogPoint {
    /// Pyramid level
    pub level: usize,
    /// Natural log of the average chunk length
    pub log_length: Decimal,
    /// Natural log of the average rescaled range
    pub log_rescaled_range: Decimal,
}

/// Take natural logs of every region's average length and average rescaled range.
///
/// Fails with `NonPositiveLog` if either quantity is not strictly positive.
pub fn log_points(regions: &[RegionSummary], ctx: &DecimalContext) -> FractalResult<Vec<LogLogPoint>> {
    regions
        .iter()
        .map(|region| -> FractalResult<LogLogPoint> {
            if region.average_chunk_length == 0 {
                return Err(FractalAnalysisError::NonPositiveLog {
                    quantity: "average chunk length".to_string(),
                    level: region.level,
                    value: "0".to_string(),
                });
            }
            if region.average_rescaled_range <= Decimal::ZERO {
                return Err(FractalAnalysisError::NonPositiveLog {
                    quantity: "average rescaled range".to_string(),
                    level: region.level,
                    value: region.average_rescaled_range.to_string(),
                });
            }

            Ok(LogLogPoint {
                level: region.level,
                log_length: ctx.ln(Decimal::from(region.average_chunk_length))?,
                log_rescaled_range: ctx.ln(region.average_rescaled_range)?,
            })
        })
        .collect()
}

/// Ordinary least-squares slope of `log_rescaled_range` on `log_length`.
///
/// `slope = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²`, each operation rounded by `ctx`.
/// The result is not clamped to (0, 1).
pub fn least_squares_slope(points: &[LogLogPoint], ctx: &DecimalContext) -> FractalResult<Decimal> {
    if points.len() < 2 {
        return Err(FractalAnalysisError::InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }

    let xs: Vec<Decimal> = points.iter().map(|p| p.log_length).collect();
    let ys: Vec<Decimal> = points.iter().map(|p| p.log_rescaled_range).collect();
    let x_mean = ctx.mean(&xs)?;
    let y_mean = ctx.mean(&ys)?;

    let mut numerator = Decimal::ZERO;
    let mut denominator = Decimal::ZERO;
    for (&x, &y) in xs.iter().zip(&ys) {
        let dx = ctx.sub(x, x_mean)?;
        let dy = ctx.sub(y, y_mean)?;
        numerator = ctx.add(numerator, ctx.mul(dx, dy)?)?;
        denominator = ctx.add(denominator, ctx.mul(dx, dx)?)?;
    }

    if denominator.is_zero() {
        return Err(FractalAnalysisError::DegenerateRegression {
            reason: format!("all {} log lengths are identical ({})", points.len(), x_mean),
        });
    }

    ctx.div(numerator, denominator)
}
