//! Lazy-greedy maximum coverage over edit neighborhoods
//!
//! Leaves first:
//! - `neighborhood` - the edit relation (`neighbors`) and its alphabet
//! - `ball` - parallel ball evaluation on a fixed worker pool
//! - `estimator` - moving average of observed ball sizes
//! - `heap` - max-heap of candidates with lazy invalidation
//! - `greedy` - the selection state machine
//! - `metrics` - exact / fuzzy / naive success rates

mod ball;
mod config;
mod error;
mod estimator;
mod greedy;
mod heap;
pub mod metrics;
pub mod neighborhood;

pub use ball::{Ball, BallEvaluator, ScoredBall};
pub use config::{
    DEFAULT_BALL_DECAY, DEFAULT_INITIAL_BALL_SIZE, DEFAULT_MIN_LENGTH, DEFAULT_WORKERS, SelectConfig,
};
pub use error::CoverError;
pub use estimator::BallSizeEstimator;
pub use greedy::{
    Acceptance, LazyGreedySelector, Phase, Progress, SelectionResult, Silent, Status, Termination,
};
pub use heap::{Candidate, CandidateHeap};
pub use metrics::Success;
pub use neighborhood::{Alphabet, Neighbors, neighbors};
