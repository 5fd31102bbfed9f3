//! Frequency list loading
//!
//! Reads leak-style frequency lists: one `count password` pair per line, the
//! count possibly right-aligned with leading spaces.

use crate::core::Population;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Error type for unreadable frequency lists
#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    /// The first field of a line is not a non-negative integer (1-based line number)
    InvalidCount { line: usize, content: String },
    /// The list contained no passwords at all
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read frequency list: {err}"),
            Self::InvalidCount { line, content } => {
                write!(f, "Invalid count on line {line}: {content:?}")
            }
            Self::Empty => write!(f, "Frequency list contains no passwords"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Load a population from a `count password` file
///
/// # Errors
///
/// Returns `DatasetError` if the file cannot be read, a count is malformed,
/// or no password is found.
///
/// # Examples
/// ```no_run
/// use typo_cover::dataset::load_from_file;
///
/// let population = load_from_file("data/sample_withcount.txt").unwrap();
/// println!("Loaded {} passwords", population.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Population, DatasetError> {
    let content = fs::read_to_string(path)?;
    let population = parse_frequency_list(&content)?;

    if population.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(population)
}

/// Parse `count password` lines into a population
///
/// Blank lines and lines with a count but no password are skipped. The
/// password is everything after the whitespace following the count, so
/// passwords may contain inner spaces. Repeated passwords are summed.
///
/// # Errors
///
/// Returns `DatasetError::InvalidCount` for the first line whose count does not parse.
///
/// # Examples
/// ```
/// use typo_cover::dataset::parse_frequency_list;
///
/// let population = parse_frequency_list("  290729 123456\n  59462 password\n").unwrap();
/// assert_eq!(population.len(), 2);
/// assert_eq!(population.total_frequency(), 350_191);
/// ```
pub fn parse_frequency_list(content: &str) -> Result<Population, DatasetError> {
    let mut entries = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }

        let (count, password) = match trimmed.split_once(char::is_whitespace) {
            Some((count, rest)) => (count, rest.trim_start()),
            None => (trimmed, ""),
        };
        let count: u64 = count.parse().map_err(|_| DatasetError::InvalidCount {
            line: i + 1,
            content: line.to_string(),
        })?;

        if !password.is_empty() {
            entries.push((password.to_string(), count));
        }
    }

    Ok(Population::new(entries))
}
