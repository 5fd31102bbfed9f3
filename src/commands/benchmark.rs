//! Benchmark command
//!
//! Times a selection run over a synthetic population.

use crate::cover::{LazyGreedySelector, SelectConfig, Silent, Success, Termination};
use crate::dataset::synthetic;
use std::time::{Duration, Instant};

/// Fractions of the guess budget at which cumulative coverage is reported
const CHECKPOINTS: [f64; 4] = [0.1, 0.25, 0.5, 1.0];

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub population_size: usize,
    pub total_frequency: u64,
    pub guesses: usize,
    pub targets_scanned: usize,
    pub termination: Termination,
    pub success: Success,
    /// `(guesses used, fraction of mass covered)` at each checkpoint
    pub coverage_curve: Vec<(usize, f64)>,
    pub duration: Duration,
    pub targets_per_second: f64,
}

/// Run a selection of `config.rate_limit` guesses over `synthetic(size, seed)`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the worker pool
/// cannot be started.
pub fn run_benchmark(size: usize, seed: u64, config: &SelectConfig) -> Result<BenchmarkResult, String> {
    let population = synthetic(size, seed);
    let selector = LazyGreedySelector::new(&population, config).map_err(|e| e.to_string())?;

    let start = Instant::now();
    let result = selector.run(&Silent);
    let duration = start.elapsed();

    let total = population.total_frequency();
    let gains: Vec<u64> = result.accepted.iter().map(|a| a.gain).collect();

    Ok(BenchmarkResult {
        population_size: population.len(),
        total_frequency: total,
        guesses: result.guesses.len(),
        targets_scanned: result.targets_scanned,
        termination: result.termination,
        success: result.success,
        coverage_curve: coverage_curve(&gains, total),
        duration,
        targets_per_second: result.targets_scanned as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

/// Cumulative covered fraction after each checkpoint's share of the guesses
fn coverage_curve(gains: &[u64], total: u64) -> Vec<(usize, f64)> {
    if gains.is_empty() || total == 0 {
        return Vec::new();
    }

    let mut curve: Vec<(usize, f64)> = Vec::with_capacity(CHECKPOINTS.len());
    for share in CHECKPOINTS {
        // Cast is safe: share is in (0, 1]
        let used = ((gains.len() as f64 * share).ceil() as usize).clamp(1, gains.len());
        if curve.last().is_some_and(|&(prev, _)| prev == used) {
            continue;
        }
        let covered: u64 = gains[..used].iter().sum();
        curve.push((used, covered as f64 / total as f64));
    }
    curve
}
