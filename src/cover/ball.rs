//! Ball evaluation
//!
//! The ball of a guess is the set of targets it covers: every target that
//! appears in the guess's edit neighborhood and meets the length policy.
//! Balls are recomputed whenever they are needed and never cached.

use super::config::SelectConfig;
use super::error::CoverError;
use super::neighborhood::{Alphabet, neighbors};
use crate::core::{FrequencyTable, Password, Population, TargetId};
use rayon::prelude::*;

/// Sorted, duplicate-free target ids covered by one guess
pub type Ball = Vec<TargetId>;

/// A ball together with its live mass at evaluation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredBall {
    pub ball: Ball,
    pub mass: u64,
}

impl ScoredBall {
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.ball.len()
    }
}

/// Computes balls against a read-only population on a fixed worker pool
///
/// Workers only ever see `&Population` and `&FrequencyTable`; all mutation
/// happens on the caller's thread between batches.
pub struct BallEvaluator<'p> {
    population: &'p Population,
    alphabet: Alphabet,
    min_length: usize,
    pool: rayon::ThreadPool,
}

impl<'p> BallEvaluator<'p> {
    /// Create an evaluator with its own pool of `workers` threads
    ///
    /// # Errors
    /// Returns `CoverError` if `workers` is zero or the pool cannot be built.
    pub fn new(
        population: &'p Population,
        alphabet: Alphabet,
        min_length: usize,
        workers: usize,
    ) -> Result<Self, CoverError> {
        if workers == 0 {
            return Err(CoverError::NoWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ball-worker-{i}"))
            .build()?;

        Ok(Self {
            population,
            alphabet,
            min_length,
            pool,
        })
    }

    /// Create an evaluator from a selection config
    ///
    /// # Errors
    /// Returns `CoverError` if the pool cannot be built.
    pub fn from_config(population: &'p Population, config: &SelectConfig) -> Result<Self, CoverError> {
        Self::new(
            population,
            config.alphabet.clone(),
            config.min_length,
            config.workers,
        )
    }

    #[must_use]
    pub const fn population(&self) -> &'p Population {
        self.population
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of worker threads
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Compute the ball of a guess
    ///
    /// # Examples
    /// ```
    /// use typo_cover::core::Population;
    /// use typo_cover::cover::{Alphabet, BallEvaluator};
    ///
    /// let population = Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)]);
    /// let evaluator = BallEvaluator::new(&population, Alphabet::new("ab"), 6, 1).unwrap();
    ///
    /// let ball = evaluator.ball("aaaaaa");
    /// assert_eq!(ball.len(), 2);
    /// ```
    #[must_use]
    pub fn ball(&self, guess: &str) -> Ball {
        let mut ball: Ball = neighbors(&Password::new(guess), &self.alphabet)
            .filter(|edit| edit.len() >= self.min_length)
            .filter_map(|edit| self.population.lookup(&edit))
            .collect();
        ball.sort_unstable();
        ball.dedup();
        ball
    }

    /// Compute a ball and its live mass on the calling thread
    #[must_use]
    pub fn score(&self, guess: &str, live: &FrequencyTable) -> ScoredBall {
        let ball = self.ball(guess);
        let mass = live.sum(&ball);
        ScoredBall { ball, mass }
    }

    /// Score a batch of guesses in parallel, preserving input order
    ///
    /// Blocks until every guess has been scored. A panic in any task is
    /// re-raised here and aborts the run.
    #[must_use]
    pub fn score_batch(&self, guesses: &[String], live: &FrequencyTable) -> Vec<ScoredBall> {
        self.pool
            .install(|| guesses.par_iter().map(|guess| self.score(guess, live)).collect())
    }

    /// Compute the balls of a batch of guesses in parallel, preserving input order
    #[must_use]
    pub fn balls(&self, guesses: &[String]) -> Vec<Ball> {
        self.pool
            .install(|| guesses.par_iter().map(|guess| self.ball(guess)).collect())
    }
}
