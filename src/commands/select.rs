//! Select command
//!
//! Runs the lazy-greedy selector over a population with terminal progress.

use crate::core::{Population, Target};
use crate::cover::{
    Acceptance, LazyGreedySelector, Progress, SelectConfig, SelectionResult, Status,
};
use crate::output::formatters::percent;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter drawing a bar of accepted guesses
///
/// Accepted guesses and heap growth are printed above the bar; scanned
/// targets only when `verbose` is set.
pub struct CliProgress {
    bar: ProgressBar,
    verbose: bool,
}

impl CliProgress {
    #[must_use]
    pub fn new(rate_limit: usize, verbose: bool) -> Self {
        let bar = ProgressBar::new(rate_limit as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} guesses | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        Self { bar, verbose }
    }

    /// Hidden reporter, for runs that should print nothing
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            verbose: false,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Complete!");
    }
}

impl Progress for CliProgress {
    fn guess_accepted(&self, acceptance: &Acceptance, status: &Status) {
        let weight = acceptance.gain as f64 / status.total_frequency.max(1) as f64;
        self.bar.println(format!(
            "Guess({}/{}): {} weight: {}",
            status.accepted,
            status.rate_limit,
            acceptance.guess.bright_white().bold(),
            percent(weight).bright_yellow()
        ));
        self.bar.set_position(status.accepted as u64);
    }

    fn target_scanned(&self, target: &Target, status: &Status) {
        self.bar.set_message(format!(
            "scanned {} | heap {}",
            status.targets_scanned, status.heap_size
        ));
        if self.verbose {
            self.bar.println(format!(
                "({:.1}s) : {}: {} ({})",
                status.elapsed.as_secs_f64(),
                status.targets_scanned,
                target.text,
                target.frequency
            ));
        }
    }

    fn heap_grew(&self, status: &Status) {
        self.bar.println(
            format!(
                ">< ({:.1}s) : Heap size: {} ballsize: {:.1}",
                status.elapsed.as_secs_f64(),
                status.heap_size,
                status.ball_size_estimate
            )
            .bright_black()
            .to_string(),
        );
    }
}

/// Select up to `config.rate_limit` guesses over `population`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the worker pool
/// cannot be started.
pub fn run_select<P: Progress + ?Sized>(
    population: &Population,
    config: &SelectConfig,
    progress: &P,
) -> Result<SelectionResult, String> {
    let selector = LazyGreedySelector::new(population, config).map_err(|e| e.to_string())?;
    Ok(selector.run(progress))
}
