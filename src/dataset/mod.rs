//! Password frequency datasets
//!
//! Provides the bundled sample, a file loader for "count password" lists and
//! a seeded synthetic generator for benchmarks.

mod embedded;
pub mod loader;
mod synthetic;

pub use embedded::{SAMPLE, SAMPLE_COUNT};
pub use loader::{DatasetError, load_from_file, parse_frequency_list};
pub use synthetic::synthetic;

use crate::core::Population;

/// Build a population from an embedded `(password, count)` table
///
/// # Examples
/// ```
/// use typo_cover::dataset::{SAMPLE, population_from_slice};
///
/// let population = population_from_slice(SAMPLE);
/// assert_eq!(population.len(), SAMPLE.len());
/// ```
#[must_use]
pub fn population_from_slice(slice: &[(&str, u64)]) -> Population {
    Population::new(slice.iter().copied())
}
