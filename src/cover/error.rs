//! Errors raised while setting up a selection run

use std::fmt;

/// Error type for invalid selection setups
///
/// The selection loop itself has no recoverable errors: short targets are
/// skipped and exhaustion is a normal outcome. A panicking worker task is
/// propagated to the caller rather than reported here.
#[derive(Debug)]
pub enum CoverError {
    /// The worker pool must have at least one thread
    NoWorkers,
    /// The ball-size decay must lie in `[0, 1]`
    InvalidDecay(f64),
    /// The rayon pool could not be built
    Pool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => write!(f, "Worker pool needs at least one worker"),
            Self::InvalidDecay(decay) => {
                write!(f, "Ball-size decay must be within [0, 1], got {decay}")
            }
            Self::Pool(err) => write!(f, "Failed to build worker pool: {err}"),
        }
    }
}

impl std::error::Error for CoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for CoverError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::Pool(err)
    }
}
