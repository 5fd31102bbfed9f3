//! Terminal output and result persistence
//!
//! Display utilities for CLI results, and the JSON guess-list report.

pub mod display;
pub mod formatters;
pub mod report;

pub use display::{print_benchmark_result, print_evaluation_result, print_selection_result};
pub use report::{SelectionReport, default_report_path, read_guesses, write_report};
