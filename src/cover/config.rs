//! Selection run configuration

use super::error::CoverError;
use super::neighborhood::Alphabet;

/// Default number of ball-evaluation workers
pub const DEFAULT_WORKERS: usize = 5;

/// Shortest password a checker accepts, and so the shortest useful guess
pub const DEFAULT_MIN_LENGTH: usize = 6;

/// Starting ball-size estimate; balls bigger than this are not worth modelling
pub const DEFAULT_INITIAL_BALL_SIZE: f64 = 2000.0;

/// Weight kept by the old estimate on every update
pub const DEFAULT_BALL_DECAY: f64 = 0.9;

/// Parameters of one greedy selection run
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Maximum number of guesses to select
    pub rate_limit: usize,
    /// Size of the ball-evaluation worker pool
    pub workers: usize,
    /// Targets and candidates shorter than this are ignored
    pub min_length: usize,
    pub initial_ball_size: f64,
    pub ball_decay: f64,
    /// Characters used for insertions, substitutions and appends
    pub alphabet: Alphabet,
}

impl SelectConfig {
    /// Create a configuration with the given guess budget and default settings
    ///
    /// # Examples
    /// ```
    /// use typo_cover::cover::SelectConfig;
    ///
    /// let config = SelectConfig::new(100).with_workers(2);
    /// assert_eq!(config.rate_limit, 100);
    /// assert_eq!(config.workers, 2);
    /// assert_eq!(config.min_length, 6);
    /// ```
    #[must_use]
    pub fn new(rate_limit: usize) -> Self {
        Self {
            rate_limit,
            workers: DEFAULT_WORKERS,
            min_length: DEFAULT_MIN_LENGTH,
            initial_ball_size: DEFAULT_INITIAL_BALL_SIZE,
            ball_decay: DEFAULT_BALL_DECAY,
            alphabet: Alphabet::printable(),
        }
    }

    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub const fn with_initial_ball_size(mut self, initial_ball_size: f64) -> Self {
        self.initial_ball_size = initial_ball_size;
        self
    }

    #[must_use]
    pub const fn with_ball_decay(mut self, ball_decay: f64) -> Self {
        self.ball_decay = ball_decay;
        self
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Check the settings that would otherwise fail deep inside a run
    ///
    /// # Errors
    /// Returns `CoverError` if there are no workers or the decay is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoverError> {
        if self.workers == 0 {
            return Err(CoverError::NoWorkers);
        }
        if !(0.0..=1.0).contains(&self.ball_decay) {
            return Err(CoverError::InvalidDecay(self.ball_decay));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SelectConfig::new(10);
        assert_eq!(config.workers, 5);
        assert_eq!(config.min_length, 6);
        assert!((config.initial_ball_size - 2000.0).abs() < f64::EPSILON);
        assert!((config.ball_decay - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.alphabet, Alphabet::printable());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_workers_rejected() {
        let config = SelectConfig::new(10).with_workers(0);
        assert!(matches!(config.validate(), Err(CoverError::NoWorkers)));
    }

    #[test]
    fn decay_out_of_range_rejected() {
        let config = SelectConfig::new(10).with_ball_decay(1.5);
        assert!(matches!(config.validate(), Err(CoverError::InvalidDecay(_))));
    }
}
