//! Success rates of a guess list
//!
//! All rates are fractions of the population's total frequency, computed
//! against the population's frequencies, not the live table.

use super::ball::BallEvaluator;
use crate::core::{Population, TargetId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Fraction of accounts compromised by a guess list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Success {
    /// Guesses checked for exact equality
    pub exact: f64,
    /// Guesses checked by a typo-tolerant checker (union of balls)
    pub fuzzy: f64,
    /// The same number of most frequent eligible passwords, checked exactly
    pub naive: f64,
}

impl Success {
    /// Measure a guess list against the evaluator's population
    #[must_use]
    pub fn measure(evaluator: &BallEvaluator<'_>, guesses: &[String]) -> Self {
        let population = evaluator.population();
        Self {
            exact: exact_success(population, guesses),
            fuzzy: fuzzy_success(evaluator, guesses),
            naive: naive_success(population, guesses.len(), evaluator.min_length()),
        }
    }

    /// Extra success the typo-tolerant checker hands an attacker
    #[must_use]
    pub fn security_loss(&self) -> f64 {
        self.fuzzy - self.naive
    }
}

fn ratio(mass: u64, population: &Population) -> f64 {
    match population.total_frequency() {
        0 => 0.0,
        total => mass as f64 / total as f64,
    }
}

/// Mass of targets exactly equal to some guess
///
/// # Examples
/// ```
/// use typo_cover::core::Population;
/// use typo_cover::cover::metrics::exact_success;
///
/// let population = Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)]);
/// let guesses = vec!["aaaaaa".to_string(), "unknown".to_string()];
/// assert!((exact_success(&population, &guesses) - 100.0 / 160.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn exact_success(population: &Population, guesses: &[String]) -> f64 {
    let hits: FxHashSet<TargetId> = guesses
        .iter()
        .filter_map(|guess| population.lookup(guess))
        .collect();
    ratio(hits.into_iter().map(|id| population.frequency(id)).sum(), population)
}

/// Mass of the union of all guesses' balls
///
/// Balls are computed in parallel on the evaluator's pool.
#[must_use]
pub fn fuzzy_success(evaluator: &BallEvaluator<'_>, guesses: &[String]) -> f64 {
    let population = evaluator.population();
    let covered: FxHashSet<TargetId> = evaluator.balls(guesses).into_iter().flatten().collect();
    ratio(covered.into_iter().map(|id| population.frequency(id)).sum(), population)
}

/// Mass of the `q` most frequent targets at least `min_length` long
#[must_use]
pub fn naive_success(population: &Population, q: usize, min_length: usize) -> f64 {
    let mass = population
        .iter()
        .filter(|(_, target)| target.is_eligible(min_length))
        .take(q)
        .map(|(_, target)| target.frequency)
        .sum();
    ratio(mass, population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::Alphabet;

    fn population() -> Population {
        Population::new([("aaaaaa", 100), ("aaaaab", 50), ("abc", 40), ("zzzzzz", 10)])
    }

    fn guesses(texts: &[&str]) -> Vec<String> {
        texts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_ignores_duplicates_and_misses() {
        let population = population();
        let rate = exact_success(&population, &guesses(&["aaaaaa", "aaaaaa", "nothing"]));
        assert!((rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fuzzy_counts_union_once() {
        let population = population();
        let evaluator = BallEvaluator::new(&population, Alphabet::new("ab"), 6, 2).unwrap();

        // Both balls contain aaaaaa and aaaaab
        let rate = fuzzy_success(&evaluator, &guesses(&["aaaaaa", "aaaaab"]));
        assert!((rate - 0.75).abs() < 1e-12);
    }

    #[test]
    fn naive_skips_short_targets() {
        let population = population();
        assert!((naive_success(&population, 2, 6) - 0.75).abs() < 1e-12);
        assert!((naive_success(&population, 3, 6) - 0.8).abs() < 1e-12);
        assert!((naive_success(&population, 3, 3) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn measure_and_security_loss() {
        let population = population();
        let evaluator = BallEvaluator::new(&population, Alphabet::new("ab"), 6, 1).unwrap();
        let success = Success::measure(&evaluator, &guesses(&["aaaaaa"]));

        assert!((success.exact - 0.5).abs() < 1e-12);
        assert!((success.fuzzy - 0.75).abs() < 1e-12);
        assert!((success.naive - 0.5).abs() < 1e-12);
        assert!((success.security_loss() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_population_rates_are_zero() {
        let population = Population::new(Vec::<(String, u64)>::new());
        let evaluator = BallEvaluator::new(&population, Alphabet::printable(), 6, 1).unwrap();
        let success = Success::measure(&evaluator, &guesses(&["anything"]));

        assert!(success.exact.abs() < f64::EPSILON);
        assert!(success.fuzzy.abs() < f64::EPSILON);
        assert!(success.naive.abs() < f64::EPSILON);
    }
}
