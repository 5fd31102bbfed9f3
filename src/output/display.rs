//! Display functions for command results

use super::formatters::{coverage_bar, elapsed, percent};
use crate::commands::{BenchmarkResult, EvaluationResult};
use crate::cover::{SelectionResult, Success, Termination};
use colored::Colorize;

/// Width of the coverage bars
const BAR_WIDTH: usize = 30;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn print_success(success: &Success) {
    println!("\n📊 {}", "Success rates:".bright_cyan().bold());
    for (label, rate) in [
        ("Exact", success.exact),
        ("Typo-tolerant", success.fuzzy),
        ("Naive top-q", success.naive),
    ] {
        println!(
            "   {:<14} [{}] {}",
            format!("{label}:"),
            coverage_bar(rate, BAR_WIDTH).green(),
            percent(rate).bright_yellow()
        );
    }

    let loss = success.security_loss();
    let loss = if loss > 0.0 {
        percent(loss).red().bold()
    } else {
        percent(loss).green()
    };
    println!("   {:<14} {loss}", "Security loss:");
}

/// Print the result of a selection run
pub fn print_selection_result(result: &SelectionResult, rate_limit: usize) {
    header("GUESS SELECTION");

    let termination = match result.termination {
        Termination::Budget => "budget reached".green(),
        Termination::Exhausted => "candidates exhausted".yellow(),
    };
    println!("\n   Guesses:          {}/{rate_limit} ({termination})", result.guesses.len());
    println!("   Targets scanned:  {}", result.targets_scanned);
    println!("   Time taken:       {}", elapsed(result.elapsed));

    print_success(&result.success);
}

/// Print the result of evaluating a guess list
pub fn print_evaluation_result(result: &EvaluationResult, verbose: bool) {
    header("GUESS LIST EVALUATION");

    println!("\n   Guesses evaluated: {}", result.guesses);
    println!("   Accounts:          {}", result.total_frequency);

    if verbose {
        println!("\n🔎 {}", "Per guess:".bright_cyan().bold());
        let total = result.total_frequency.max(1) as f64;
        for (i, contribution) in result.contributions.iter().enumerate() {
            println!(
                "   {:>4}. {:<20} exact {:>7}  gain {:>7} ({})  ball {}",
                i + 1,
                contribution.guess.bright_white(),
                contribution.exact,
                contribution.gain,
                percent(contribution.gain as f64 / total),
                contribution.ball_size
            );
        }
    }

    print_success(&result.success);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    header("BENCHMARK RESULTS");

    println!("\n⏱  {}", "Performance:".bright_cyan().bold());
    println!("   Population:       {} passwords", result.population_size);
    println!("   Accounts:         {}", result.total_frequency);
    println!(
        "   Guesses:          {}{}",
        result.guesses,
        if result.termination == Termination::Exhausted {
            " (exhausted)".yellow().to_string()
        } else {
            String::new()
        }
    );
    println!("   Targets scanned:  {}", result.targets_scanned);
    println!("   Time taken:       {}", elapsed(result.duration));
    println!(
        "   Targets/second:   {}",
        format!("{:.1}", result.targets_per_second).bright_yellow().bold()
    );

    if !result.coverage_curve.is_empty() {
        println!("\n📈 {}", "Coverage curve:".bright_cyan().bold());
        for &(used, covered) in &result.coverage_curve {
            println!(
                "   {used:>6} guesses: {} {}",
                coverage_bar(covered, 40).green(),
                percent(covered)
            );
        }
    }

    print_success(&result.success);
}
