//! JSON guess-list reports
//!
//! A selection run is saved as a JSON object holding the ordered guess list
//! and its success rates. Guess lists can be read back from such a report,
//! from a bare JSON array, or from a plain file with one guess per line.

use crate::cover::{SelectionResult, Success, Termination};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Persisted outcome of a selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub rate_limit: usize,
    pub guesses: Vec<String>,
    pub success: Success,
    pub exhausted: bool,
    pub targets_scanned: usize,
    pub elapsed_secs: f64,
}

impl SelectionReport {
    #[must_use]
    pub fn new(rate_limit: usize, result: &SelectionResult) -> Self {
        Self {
            rate_limit,
            guesses: result.guesses.clone(),
            success: result.success,
            exhausted: result.termination == Termination::Exhausted,
            targets_scanned: result.targets_scanned,
            elapsed_secs: result.elapsed.as_secs_f64(),
        }
    }
}

/// `guess_<q>.json` in the current directory
#[must_use]
pub fn default_report_path(rate_limit: usize) -> PathBuf {
    PathBuf::from(format!("guess_{rate_limit}.json"))
}

/// Write a report as pretty-printed JSON
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_report<P: AsRef<Path>>(path: P, report: &SelectionReport) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Read a guess list from a report, a JSON array, or a line-per-guess file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or its JSON is malformed.
pub fn read_guesses<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    parse_guesses(&content)
}

fn parse_guesses(content: &str) -> io::Result<Vec<String>> {
    match content.trim_start().chars().next() {
        Some('{') => Ok(serde_json::from_str::<SelectionReport>(content)?.guesses),
        Some('[') => Ok(serde_json::from_str(content)?),
        _ => Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SelectionReport {
        SelectionReport {
            rate_limit: 2,
            guesses: vec!["password".to_string(), "iloveyou".to_string()],
            success: Success {
                exact: 0.25,
                fuzzy: 0.5,
                naive: 0.25,
            },
            exhausted: false,
            targets_scanned: 12,
            elapsed_secs: 0.5,
        }
    }

    #[test]
    fn default_path_uses_rate_limit() {
        assert_eq!(default_report_path(100), PathBuf::from("guess_100.json"));
    }

    #[test]
    fn guesses_from_report_json() {
        let json = serde_json::to_string(&report()).unwrap();
        assert_eq!(parse_guesses(&json).unwrap(), report().guesses);
    }

    #[test]
    fn guesses_from_json_array() {
        let guesses = parse_guesses(r#"  ["abcdef", "ghijkl"]"#).unwrap();
        assert_eq!(guesses, vec!["abcdef", "ghijkl"]);
    }

    #[test]
    fn guesses_from_lines_keep_spaces() {
        let guesses = parse_guesses("monkey1\n\ni love you\n").unwrap();
        assert_eq!(guesses, vec!["monkey1", "i love you"]);
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let err = parse_guesses("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn report_file_round_trip() {
        let path = std::env::temp_dir().join(format!("typo_cover_report_{}.json", std::process::id()));
        write_report(&path, &report()).unwrap();

        let guesses = read_guesses(&path).unwrap();
        assert_eq!(guesses, report().guesses);

        fs::remove_file(&path).unwrap();
    }
}
