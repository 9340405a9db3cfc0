//! Per-chunk rescaled-range statistics.
//!
//! For each chunk: arithmetic mean, sample standard deviation (n - 1
//! denominator), range of the mean-centered running sum, and the rescaled
//! range R/S = range / std. Chunks are independent of one another; results
//! stay grouped by pyramid level.
//!
//! Mean and std come from `f64` and are rounded once on entering the decimal
//! context. `Decimal` has a fixed scale of 28, so squared deviations of tiny
//! returns cannot be carried there.

use crate::chunking::{Chunk, ChunkPyramid};
use crate::decimal_ops::{decimal_from_f64, DecimalContext};
use crate::errors::{FractalAnalysisError, FractalResult};
use crate::volatility::{mean as float_mean, sample_variance};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics of one chunk
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChunkStatistics {
    /// Partition index within its level
    pub index: usize,
    /// Number of elements in the chunk
    pub size: usize,
    /// Arithmetic mean
    pub mean: Decimal,
    /// Sample standard deviation
    pub std_dev: Decimal,
    /// max - min of the mean-centered running sum
    pub range: Decimal,
    /// `range / std_dev`
    pub rescaled_range: Decimal,
}

/// Chunk statistics of one pyramid level, in partition order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelStatistics {
    /// Pyramid level
    pub level: usize,
    /// One entry per partition
    pub chunks: Vec<ChunkStatistics>,
}

impl LevelStatistics {
    /// Number of partitions at this level
    pub fn partitions(&self) -> usize {
        self.chunks.len()
    }

    /// Rescaled ranges in partition order
    pub fn rescaled_ranges(&self) -> Vec<Decimal> {
        self.chunks.iter().map(|c| c.rescaled_range).collect()
    }
}

/// Parallel sequences over every chunk, level-ascending then partition-ascending.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlattenedStatistics {
    /// Chunk means
    pub means: Vec<Decimal>,
    /// Chunk sample standard deviations
    pub std_devs: Vec<Decimal>,
    /// Chunk mean-centered cumulative ranges
    pub ranges: Vec<Decimal>,
    /// Chunk rescaled ranges
    pub rescaled_ranges: Vec<Decimal>,
}

/// Running sums `S_j = Σ_{i<=j} (x_i - mean)` in original order.
pub fn cumulative_deviations(
    values: &[Decimal],
    mean: Decimal,
    ctx: &DecimalContext,
) -> FractalResult<Vec<Decimal>> {
    let mut running = Decimal::ZERO;
    let mut sums = Vec::with_capacity(values.len());
    for &value in values {
        let deviation = ctx.sub(value, mean)?;
        running = ctx.add(running, deviation)?;
        sums.push(running);
    }
    Ok(sums)
}

/// max(S) - min(S) over the mean-centered running sums.
pub fn mean_centered_range(
    values: &[Decimal],
    mean: Decimal,
    ctx: &DecimalContext,
) -> FractalResult<Decimal> {
    let sums = cumulative_deviations(values, mean, ctx)?;
    let (min, max) = match sums.first() {
        Some(&first) => sums
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
        None => {
            return Err(FractalAnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            })
        }
    };
    ctx.sub(max, min)
}

/// Statistics of a single chunk.
///
/// Fails with `DegenerateChunk` below two elements and `ZeroVariance` for a
/// constant chunk.
pub fn chunk_statistics(chunk: &Chunk<'_>, ctx: &DecimalContext) -> FractalResult<ChunkStatistics> {
    let size = chunk.values.len();
    if size < 2 {
        return Err(FractalAnalysisError::DegenerateChunk {
            level: chunk.level,
            index: chunk.index,
            size,
        });
    }

    let variance = sample_variance(chunk.values)?;
    if variance == 0.0 {
        return Err(FractalAnalysisError::ZeroVariance {
            level: chunk.level,
            index: chunk.index,
        });
    }
    let mean = ctx.round(decimal_from_f64(float_mean(chunk.values)?)?)?;
    let std_dev = ctx.round(decimal_from_f64(variance.sqrt())?)?;
    if std_dev.is_zero() {
        return Err(FractalAnalysisError::NumericalError {
            reason: format!(
                "standard deviation {:e} of level {} partition {} is below Decimal resolution",
                variance.sqrt(),
                chunk.level,
                chunk.index
            ),
            operation: Some("chunk_statistics".to_string()),
        });
    }

    let values = chunk
        .values
        .iter()
        .map(|&v| decimal_from_f64(v))
        .collect::<FractalResult<Vec<Decimal>>>()?;

    let range = mean_centered_range(&values, mean, ctx)?;
    let rescaled_range = ctx.div(range, std_dev)?;

    #[cfg(feature = "debug_logging")]
    log::trace!(
        "level {} partition {}: n={} mean={} std={} range={} R/S={}",
        chunk.level,
        chunk.index,
        size,
        mean,
        std_dev,
        range,
        rescaled_range
    );

    Ok(ChunkStatistics {
        index: chunk.index,
        size,
        mean,
        std_dev,
        range,
        rescaled_range,
    })
}

/// Statistics for every chunk of the pyramid, grouped by level.
pub fn pyramid_statistics(
    pyramid: &ChunkPyramid<'_>,
    ctx: &DecimalContext,
) -> FractalResult<Vec<LevelStatistics>> {
    pyramid
        .levels()
        .enumerate()
        .map(|(level, chunks)| -> FractalResult<LevelStatistics> {
            let chunks = chunks
                .iter()
                .map(|chunk| chunk_statistics(chunk, ctx))
                .collect::<FractalResult<Vec<_>>>()?;
            Ok(LevelStatistics { level, chunks })
        })
        .collect()
}

/// Flatten level-grouped statistics into parallel sequences.
pub fn flatten_statistics(levels: &[LevelStatistics]) -> FlattenedStatistics {
    let mut flat = FlattenedStatistics::default();
    for chunk in levels.iter().flat_map(|l| l.chunks.iter()) {
        flat.means.push(chunk.mean);
        flat.std_devs.push(chunk.std_dev);
        flat.ranges.push(chunk.range);
        flat.rescaled_ranges.push(chunk.rescaled_range);
    }
    flat
}
