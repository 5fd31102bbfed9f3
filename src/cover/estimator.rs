//! Adaptive ball-size estimate
//!
//! An exponential moving average of the largest ball seen per expansion
//! round. The selector multiplies it by a target's frequency to bound what
//! any not-yet-generated candidate could still cover.

/// Exponential moving average of per-round maximum ball sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSizeEstimator {
    estimate: f64,
    decay: f64,
}

impl BallSizeEstimator {
    /// Start from `initial`, keeping `decay` of the old estimate on each update
    #[must_use]
    pub const fn new(initial: f64, decay: f64) -> Self {
        Self {
            estimate: initial,
            decay,
        }
    }

    #[inline]
    #[must_use]
    pub const fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Fold in the largest ball observed in one round
    ///
    /// # Examples
    /// ```
    /// use typo_cover::cover::BallSizeEstimator;
    ///
    /// let mut estimator = BallSizeEstimator::new(2000.0, 0.9);
    /// estimator.observe(1000);
    /// assert!((estimator.estimate() - 1900.0).abs() < 1e-9);
    /// ```
    pub fn observe(&mut self, max_ball_size: usize) {
        self.estimate = self
            .decay
            .mul_add(self.estimate, (1.0 - self.decay) * max_ball_size as f64);
    }

    /// Mass a fresh candidate around a target of this frequency could plausibly reach
    #[inline]
    #[must_use]
    pub fn bound(&self, frequency: u64) -> f64 {
        frequency as f64 * self.estimate
    }
}
