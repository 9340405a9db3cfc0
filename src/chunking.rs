//! Hierarchical halving of a return series into a chunk pyramid.
//!
//! Level `l` splits the whole series into `2^l` contiguous partitions whose
//! sizes differ by at most one: with `n = q * 2^l + r`, the first `r`
//! partitions hold `q + 1` elements and the rest hold `q`. Every level tiles
//! the series exactly.
//!
//! The pyramid borrows the series and hands out slices, keyed by level, so no
//! data is copied and no flattened index arithmetic is needed downstream.

use crate::errors::{FractalAnalysisError, FractalResult};
use std::ops::Range;

/// Fewest returns that produce a usable pyramid.
pub const MIN_RETURNS: usize = 10;

/// Pyramid depth `k` for a series of `n` returns.
///
/// | n        | k |
/// |----------|---|
/// | < 10     | error |
/// | 10..16   | 2 |
/// | 16..30   | 3 |
/// | 30..60   | 4 |
/// | >= 60    | 5 |
pub fn chunk_depth(n: usize) -> FractalResult<usize> {
    match n {
        0..=9 => Err(FractalAnalysisError::InsufficientData {
            required: MIN_RETURNS,
            actual: n,
        }),
        10..=15 => Ok(2),
        16..=29 => Ok(3),
        30..=59 => Ok(4),
        _ => Ok(5),
    }
}

/// Index ranges of `parts` near-equal contiguous partitions of `len` elements.
///
/// Remainder elements go to the leading partitions. Zero partitions is an
/// `InvalidParameter` error.
pub fn partition_bounds(len: usize, parts: usize) -> FractalResult<Vec<Range<usize>>> {
    if parts == 0 {
        return Err(zero_partitions());
    }
    let (count, extra) = (len / parts, len % parts);
    Ok((0..parts)
        .map(|i| {
            let start = i * count + i.min(extra);
            let end = (i + 1) * count + (i + 1).min(extra);
            start..end
        })
        .collect())
}

pub(crate) fn zero_partitions() -> FractalAnalysisError {
    FractalAnalysisError::InvalidParameter {
        parameter: "partitions".to_string(),
        value: 0.0,
        constraint: "> 0".to_string(),
    }
}

/// One partition of the series at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
    /// Pyramid level, 0 being the whole series
    pub level: usize,
    /// Partition index within the level
    pub index: usize,
    /// Elements of the partition, in original order
    pub values: &'a [f64],
}

/// All halving levels `0..=depth` over a borrowed return series.
#[derive(Debug, Clone, Copy)]
pub struct ChunkPyramid<'a> {
    series: &'a [f64],
    depth: usize,
}

impl<'a> ChunkPyramid<'a> {
    /// Build the pyramid with depth chosen by [`chunk_depth`].
    pub fn new(series: &'a [f64]) -> FractalResult<Self> {
        let depth = chunk_depth(series.len())?;
        log::debug!("chunk pyramid: {} returns, depth {}", series.len(), depth);
        Ok(Self { series, depth })
    }

    /// Build the pyramid with an explicit depth.
    ///
    /// The deepest level must still give every partition at least one element.
    pub fn with_depth(series: &'a [f64], depth: usize) -> FractalResult<Self> {
        let partitions = partitions_at(depth)?;
        if partitions > series.len() {
            return Err(FractalAnalysisError::InsufficientData {
                required: partitions,
                actual: series.len(),
            });
        }
        Ok(Self { series, depth })
    }

    /// Deepest level `k`
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of levels, `k + 1`
    pub fn level_count(&self) -> usize {
        self.depth + 1
    }

    /// Length of the underlying series
    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    /// Underlying series
    pub fn series(&self) -> &'a [f64] {
        self.series
    }

    /// Total chunks across all levels, `2^(k+1) - 1`
    pub fn chunk_count(&self) -> usize {
        (1usize << (self.depth + 1)) - 1
    }

    /// Partitions of one level, or `None` past the deepest level.
    pub fn level(&self, level: usize) -> Option<Vec<Chunk<'a>>> {
        if level > self.depth {
            return None;
        }
        let series = self.series;
        let chunks = partition_bounds(series.len(), 1 << level)
            .ok()?
            .into_iter()
            .enumerate()
            .map(|(index, range)| Chunk {
                level,
                index,
                values: &series[range],
            })
            .collect();
        Some(chunks)
    }

    /// Every level in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = Vec<Chunk<'a>>> + '_ {
        (0..=self.depth).filter_map(move |level| self.level(level))
    }

    /// All chunks, level-ascending then partition-ascending.
    pub fn iter_chunks(&self) -> impl Iterator<Item = Chunk<'a>> + '_ {
        self.levels().flatten()
    }
}

fn partitions_at(level: usize) -> FractalResult<usize> {
    u32::try_from(level)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .filter(|&p| p.checked_mul(2).is_some())
        .ok_or_else(|| FractalAnalysisError::InvalidParameter {
            parameter: "depth".to_string(),
            value: level as f64,
            constraint: format!("< {}", usize::BITS - 1),
        })
}
