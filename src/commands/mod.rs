//! Command implementations

pub mod benchmark;
pub mod evaluate;
pub mod select;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use evaluate::{EvaluationResult, GuessContribution, evaluate_guesses};
pub use select::{CliProgress, run_select};
