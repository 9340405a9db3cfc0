//! # Analysis Results Structures
//!
//! Output of one estimation run and its two tabular views: the per-level
//! region table and the log-log table.

use crate::regions::RegionSummary;
use crate::regression::LogLogPoint;
use crate::rescaled_range::{flatten_statistics, FlattenedStatistics, LevelStatistics};
use crate::volatility::DiffusionParameters;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hurst exponent of an uncorrelated random walk
pub const RANDOM_WALK_HURST: f64 = 0.5;

/// Half-width of the band around 0.5 read as a random walk
pub const DEFAULT_RANDOM_WALK_TOLERANCE: f64 = 0.05;

/// Memory behaviour implied by a Hurst exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemoryRegime {
    /// H < 0.5: increments tend to reverse
    AntiPersistent,
    /// H ≈ 0.5: increments are uncorrelated
    RandomWalk,
    /// H > 0.5: increments tend to continue
    Persistent,
}

impl MemoryRegime {
    /// Classify `hurst`, treating `|H - 0.5| <= tolerance` as a random walk.
    pub fn classify(hurst: f64, tolerance: f64) -> Self {
        if (hurst - RANDOM_WALK_HURST).abs() <= tolerance {
            MemoryRegime::RandomWalk
        } else if hurst < RANDOM_WALK_HURST {
            MemoryRegime::AntiPersistent
        } else {
            MemoryRegime::Persistent
        }
    }
}

impl fmt::Display for MemoryRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemoryRegime::AntiPersistent => "anti-persistent (mean-reverting)",
            MemoryRegime::RandomWalk => "random walk",
            MemoryRegime::Persistent => "persistent (trending)",
        };
        f.write_str(label)
    }
}

/// Complete result of a rescaled-range estimation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HurstAnalysis {
    /// Number of returns analysed
    pub series_len: usize,
    /// Deepest pyramid level
    pub depth: usize,
    /// Chunk statistics grouped by level
    pub levels: Vec<LevelStatistics>,
    /// One summary per level
    pub regions: Vec<RegionSummary>,
    /// One log-log pair per level
    pub log_points: Vec<LogLogPoint>,
    /// Fitted slope; not clamped to (0, 1)
    pub hurst_exponent: f64,
    /// Volatility and drift derived from the exponent
    pub parameters: DiffusionParameters,
}

impl HurstAnalysis {
    /// Hurst-scaled volatility
    pub fn volatility(&self) -> f64 {
        self.parameters.volatility
    }

    /// Drift per unit time
    pub fn drift(&self) -> f64 {
        self.parameters.drift
    }

    /// Memory regime with the default random-walk band
    pub fn regime(&self) -> MemoryRegime {
        MemoryRegime::classify(self.hurst_exponent, DEFAULT_RANDOM_WALK_TOLERANCE)
    }

    /// Means, stds, ranges and rescaled ranges in flattened chunk order
    pub fn flattened_statistics(&self) -> FlattenedStatistics {
        flatten_statistics(&self.levels)
    }

    /// Region table view
    pub fn region_table(&self) -> RegionTable<'_> {
        RegionTable(&self.regions)
    }

    /// Log-log table view
    pub fn log_table(&self) -> LogTable<'_> {
        LogTable(&self.log_points, &self.regions)
    }
}

/// level → (partitions, average length, average R/S)
#[derive(Debug, Clone, Copy)]
pub struct RegionTable<'a>(pub &'a [RegionSummary]);

impl fmt::Display for RegionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>12} {:>16}", "Partitions", "Avg length", "Avg R/S")?;
        for region in self.0 {
            writeln!(
                f,
                "{:>10} {:>12} {:>16}",
                region.partitions, region.average_chunk_length, region.average_rescaled_range
            )?;
        }
        Ok(())
    }
}

/// level → (ln average length, ln average R/S)
#[derive(Debug, Clone, Copy)]
pub struct LogTable<'a>(pub &'a [LogLogPoint], pub &'a [RegionSummary]);

impl fmt::Display for LogTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>16} {:>16}", "Partitions", "ln(length)", "ln(R/S)")?;
        for point in self.0 {
            let partitions = self
                .1
                .iter()
                .find(|r| r.level == point.level)
                .map_or(1usize << point.level, |r| r.partitions);
            writeln!(
                f,
                "{:>10} {:>16} {:>16}",
                partitions, point.log_length, point.log_rescaled_range
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for HurstAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rescaled ranges per region:")?;
        write!(f, "{}", self.region_table())?;
        writeln!(f, "Logarithms:")?;
        write!(f, "{}", self.log_table())?;
        writeln!(f, "Hurst exponent: {} ({})", self.hurst_exponent, self.regime())?;
        writeln!(f, "Volatility: {}", self.volatility())?;
        write!(f, "Drift: {}", self.drift())
    }
}
