//! Integration tests for the rescaled-range pipeline across many series lengths.
//!
//! Synthetic price paths are geometric random walks driven by a seeded
//! ChaCha generator, so every run sees the same data.

use assert_approx_eq::assert_approx_eq;
use fractal_params::{
    chunk_depth, estimate_from_returns, estimate_hurst_parameters, log_returns, ChunkPyramid,
    FractalAnalysisError,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

fn random_walk_prices(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut price = 100.0;
    let mut prices = Vec::with_capacity(n);
    prices.push(price);
    for _ in 1..n {
        let shock: f64 = rng.sample(StandardNormal);
        price *= (0.0002 + 0.01 * shock).exp();
        prices.push(price);
    }
    prices
}

/// Lengths whose deepest level would contain single-element chunks.
fn has_singleton_chunks(n: usize) -> bool {
    matches!(n, 30 | 31 | 60..=63)
}

#[test]
fn test_every_level_tiles_the_series() {
    for n in 10..300 {
        let returns = log_returns(&random_walk_prices(n + 1, n as u64)).unwrap();
        let pyramid = ChunkPyramid::new(&returns).unwrap();

        for chunks in pyramid.levels() {
            let joined: Vec<f64> = chunks.iter().flat_map(|c| c.values.iter().copied()).collect();
            assert_eq!(joined, returns, "n = {}", n);

            let total: usize = chunks.iter().map(|c| c.values.len()).sum();
            assert_eq!(total, n);

            let max = chunks.iter().map(|c| c.values.len()).max().unwrap();
            let min = chunks.iter().map(|c| c.values.len()).min().unwrap();
            assert!(max - min <= 1, "n = {}: sizes {}..={}", n, min, max);

            // larger partitions come first
            assert!(chunks.windows(2).all(|w| w[0].values.len() >= w[1].values.len()));
        }
    }
}

#[test]
fn test_depth_mapping_table() {
    let table = [(10..16, 2), (16..30, 3), (30..60, 4), (60..500, 5)];
    for (range, depth) in table {
        for n in range {
            assert_eq!(chunk_depth(n).unwrap(), depth, "n = {}", n);
        }
    }
    for n in 0..10 {
        assert_eq!(
            chunk_depth(n),
            Err(FractalAnalysisError::InsufficientData {
                required: 10,
                actual: n
            })
        );
    }
}

#[test]
fn test_random_walks_produce_finite_estimates() {
    for n in (10..400).filter(|&n| !has_singleton_chunks(n)) {
        let prices = random_walk_prices(n + 1, 1000 + n as u64);
        let analysis = estimate_hurst_parameters(&prices, 1.0)
            .unwrap_or_else(|e| panic!("n = {}: {}", n, e));

        assert_eq!(analysis.series_len, n);
        assert_eq!(analysis.regions.len(), analysis.depth + 1);
        assert_eq!(analysis.log_points.len(), analysis.depth + 1);
        assert!(analysis.hurst_exponent.is_finite(), "n = {}", n);
        assert!(analysis.volatility().is_finite() && analysis.volatility() >= 0.0);
        assert!(analysis.drift().is_finite());
    }
}

#[test]
fn test_singleton_chunks_are_degenerate() {
    for n in [30, 31, 60, 61, 62, 63] {
        let prices = random_walk_prices(n + 1, 7);
        match estimate_hurst_parameters(&prices, 1.0) {
            Err(FractalAnalysisError::DegenerateChunk { level, size, .. }) => {
                assert_eq!(size, 1, "n = {}", n);
                assert_eq!(level, chunk_depth(n).unwrap());
            }
            other => panic!("n = {}: expected DegenerateChunk, got {:?}", n, other),
        }
    }
}

#[test]
fn test_eleven_price_scenario_matches_reference() {
    let prices = [
        100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 106.0, 110.0, 108.0, 112.0, 111.0,
    ];
    let analysis = estimate_hurst_parameters(&prices, 1.0).unwrap();

    assert_eq!(analysis.depth, 2);
    assert_approx_eq!(analysis.hurst_exponent, 0.31665, 1e-3);
    assert_approx_eq!(analysis.volatility(), 6.58893692771394e-4, 1e-12);
    assert_approx_eq!(analysis.drift(), 1.0436218602873462e-2, 1e-12);
}

#[test]
fn test_flattened_view_matches_level_slices() {
    let returns = log_returns(&random_walk_prices(129, 3)).unwrap();
    let analysis = estimate_from_returns(&returns, 1.0).unwrap();
    let flat = analysis.flattened_statistics();

    assert_eq!(flat.rescaled_ranges.len(), (1 << (analysis.depth + 1)) - 1);
    for level in 1..=analysis.depth {
        let start = (1 << level) - 1;
        let end = (1 << (level + 1)) - 1;
        assert_eq!(
            flat.rescaled_ranges[start..end].to_vec(),
            analysis.levels[level].rescaled_ranges()
        );
    }
}

#[test]
fn test_hurst_exponent_is_scale_invariant() {
    let base = [3.0, -1.0, 2.0, -4.0, 1.0, 5.0, -2.0, 3.0, -3.0, 2.0, 1.0, -1.0];
    let reference = estimate_from_returns(&base.map(|r| r * 1e-6), 1.0).unwrap();

    for scale in [1e-10, 1e-13, 1e-15] {
        let returns = base.map(|r| r * scale);
        let analysis = estimate_from_returns(&returns, 1.0)
            .unwrap_or_else(|e| panic!("scale {}: {}", scale, e));
        assert_approx_eq!(analysis.hurst_exponent, reference.hurst_exponent, 1e-9);
        for (scaled, base) in analysis.regions.iter().zip(&reference.regions) {
            assert_eq!(scaled.average_rescaled_range, base.average_rescaled_range);
        }
    }
}

#[test]
fn test_constant_prices_fail_with_zero_variance() {
    let prices = vec![42.0; 20];
    assert!(matches!(
        estimate_hurst_parameters(&prices, 1.0),
        Err(FractalAnalysisError::ZeroVariance { level: 0, index: 0 })
    ));
}

#[test]
fn test_invalid_prices_fail_before_chunking() {
    let mut prices = random_walk_prices(20, 11);
    prices[5] = -1.0;
    assert!(matches!(
        estimate_hurst_parameters(&prices, 1.0),
        Err(FractalAnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn test_repeated_runs_are_identical() {
    let prices = random_walk_prices(100, 5);
    let first = estimate_hurst_parameters(&prices, 1.0).unwrap();
    let second = estimate_hurst_parameters(&prices, 1.0).unwrap();
    assert_eq!(first, second);
}
