//! Per-level averaging of rescaled ranges.
//!
//! Level 0 has a single chunk (the whole series) whose rescaled range is taken
//! as-is. Every deeper level averages its partitions' rescaled ranges.

use crate::chunking::zero_partitions;
use crate::decimal_ops::DecimalContext;
use crate::errors::{FractalAnalysisError, FractalResult};
use crate::rescaled_range::LevelStatistics;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of one pyramid level
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionSummary {
    /// Pyramid level
    pub level: usize,
    /// Number of partitions, `2^level`
    pub partitions: usize,
    /// Rounded average partition length
    pub average_chunk_length: usize,
    /// Average rescaled range over the level's partitions
    pub average_rescaled_range: Decimal,
}

/// Average partition length `n / partitions`, rounded down when the
/// fractional part is at most 0.25 and up otherwise.
///
/// # Example
/// ```rust
/// use fractal_params::regions::average_chunk_length;
///
/// assert_eq!(average_chunk_length(10, 4)?, 3); // 2.5 -> 3
/// assert_eq!(average_chunk_length(9, 4)?, 2);  // 2.25 -> 2
/// assert_eq!(average_chunk_length(11, 4)?, 3); // 2.75 -> 3
/// assert!(average_chunk_length(11, 0).is_err());
/// # Ok::<(), fractal_params::FractalAnalysisError>(())
/// ```
pub fn average_chunk_length(total_len: usize, partitions: usize) -> FractalResult<usize> {
    if partitions == 0 {
        return Err(zero_partitions());
    }
    let (whole, remainder) = (total_len / partitions, total_len % partitions);
    // fraction = remainder / partitions, compared against 1/4 without floats
    if remainder as u128 * 4 <= partitions as u128 {
        Ok(whole)
    } else {
        Ok(whole + 1)
    }
}

/// One summary per level, in level order.
pub fn summarize_regions(
    levels: &[LevelStatistics],
    total_len: usize,
    ctx: &DecimalContext,
) -> FractalResult<Vec<RegionSummary>> {
    levels
        .iter()
        .map(|stats| -> FractalResult<RegionSummary> {
            let partitions = stats.partitions();
            let average_rescaled_range = match (stats.level, stats.chunks.as_slice()) {
                (0, [whole]) => whole.rescaled_range,
                (_, []) => {
                    return Err(FractalAnalysisError::InsufficientData {
                        required: 1,
                        actual: 0,
                    })
                }
                _ => ctx.mean(&stats.rescaled_ranges())?,
            };
            let average_chunk_length = average_chunk_length(total_len, partitions)?;

            log::debug!(
                "level {}: {} partitions, avg length {}, avg R/S {}",
                stats.level,
                partitions,
                average_chunk_length,
                average_rescaled_range
            );

            Ok(RegionSummary {
                level: stats.level,
                partitions,
                average_chunk_length,
                average_rescaled_range,
            })
        })
        .collect()
}
