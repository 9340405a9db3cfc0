//! # Fractal Parameters
//!
//! Rescaled-range (R/S) estimation of the Hurst exponent of a price series, and
//! the volatility and drift of the fractional Brownian motion model it implies.
//!
//! The Hurst exponent H measures long-range dependence:
//! - H < 0.5: anti-persistent, increments tend to reverse
//! - H = 0.5: uncorrelated increments (classic Brownian motion)
//! - H > 0.5: persistent, increments tend to continue
//!
//! ## Quick Start
//!
//! ```rust
//! use fractal_params::{EstimatorConfig, HurstEstimator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let prices = [
//!         100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 106.0, 110.0, 108.0, 112.0, 111.0,
//!     ];
//!
//!     let estimator = HurstEstimator::new(EstimatorConfig::daily())?;
//!     let analysis = estimator.estimate_prices(&prices)?;
//!
//!     println!("{}", analysis.region_table());
//!     println!("{}", analysis.log_table());
//!     println!("H = {:.4}", analysis.hurst_exponent);
//!     println!("volatility = {:.6}, drift = {:.6}", analysis.volatility(), analysis.drift());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`preprocessing`]: prices to log-returns
//! 2. [`chunking`]: pyramid of halvings, depth 2 to 5 by series length
//! 3. [`rescaled_range`]: mean, sample std, centered cumulative range and R/S per chunk
//! 4. [`regions`]: average R/S and average chunk length per level
//! 5. [`regression`]: least-squares slope of ln(R/S) on ln(length)
//! 6. [`volatility`]: Hurst-scaled volatility and drift
//!
//! Steps 3 to 5 run in decimal arithmetic rounded to a fixed number of
//! significant digits (five by default, see [`decimal_ops`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod decimal_ops;
pub mod errors;
pub mod results;

// Pipeline stages
pub mod chunking;
pub mod estimator;
pub mod preprocessing;
pub mod regions;
pub mod regression;
pub mod rescaled_range;
pub mod volatility;

// Re-exports for convenience - main public API
pub use chunking::{chunk_depth, Chunk, ChunkPyramid, MIN_RETURNS};
pub use config::EstimatorConfig;
pub use decimal_ops::DecimalContext;
pub use errors::{FractalAnalysisError, FractalResult};
pub use estimator::{estimate_from_returns, estimate_hurst_parameters, HurstEstimator};
pub use preprocessing::{log_returns, reconstruct_prices};
pub use regions::RegionSummary;
pub use regression::LogLogPoint;
pub use rescaled_range::{ChunkStatistics, FlattenedStatistics, LevelStatistics};
pub use results::{HurstAnalysis, LogTable, MemoryRegime, RegionTable};
pub use volatility::DiffusionParameters;
