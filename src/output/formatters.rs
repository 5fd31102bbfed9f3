//! Formatting utilities for terminal output

use std::time::Duration;

/// Format a fraction as a percentage with two decimals
#[must_use]
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a success rate as a bar over [0, 1]
#[must_use]
pub fn coverage_bar(rate: f64, width: usize) -> String {
    create_progress_bar(rate, 1.0, width)
}

/// Format a duration as seconds, switching to minutes for long runs
#[must_use]
pub fn elapsed(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 120.0 {
        format!("{secs:.2}s")
    } else {
        format!("{}m{:02}s", duration.as_secs() / 60, duration.as_secs() % 60)
    }
}
