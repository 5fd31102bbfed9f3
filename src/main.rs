//! Typo Cover - CLI
//!
//! Selects, evaluates and benchmarks guess lists against typo-tolerant
//! password checkers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use typo_cover::{
    commands::{CliProgress, evaluate_guesses, run_benchmark, run_select},
    core::Population,
    cover::{
        Alphabet, DEFAULT_BALL_DECAY, DEFAULT_INITIAL_BALL_SIZE, DEFAULT_MIN_LENGTH,
        DEFAULT_WORKERS, SelectConfig,
    },
    dataset::{SAMPLE, load_from_file, population_from_slice},
    output::{
        SelectionReport, default_report_path, print_benchmark_result, print_evaluation_result,
        print_selection_result, read_guesses, write_report,
    },
};

#[derive(Parser)]
#[command(
    name = "typo_cover",
    about = "Greedy guess selection against typo-tolerant password checkers",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset: 'sample' (default, bundled) or path to a "count password" file
    #[arg(short = 'd', long, global = true, default_value = "sample")]
    dataset: String,

    /// Worker threads for ball evaluation
    #[arg(short = 'j', long, global = true, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Ignore passwords and guesses shorter than this
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Characters used for insertions and substitutions (default: printable ASCII)
    #[arg(long, global = true)]
    alphabet: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a guess list and save it as JSON
    Select {
        /// Number of guesses allowed
        #[arg(short = 'q', long)]
        rate_limit: usize,

        /// Report path (default: guess_<q>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write a report
        #[arg(long, conflicts_with = "output")]
        no_output: bool,

        /// Starting estimate of the largest ball size
        #[arg(long, default_value_t = DEFAULT_INITIAL_BALL_SIZE)]
        initial_ball_size: f64,

        /// Weight kept by the ball-size estimate on each update
        #[arg(long, default_value_t = DEFAULT_BALL_DECAY)]
        ball_decay: f64,

        /// Print every tenth scanned target
        #[arg(short, long)]
        verbose: bool,
    },

    /// Evaluate an existing guess list (JSON report, JSON array, or one per line)
    Evaluate {
        /// Guess list file
        guesses: PathBuf,

        /// Only use the first q guesses
        #[arg(short = 'q', long)]
        rate_limit: Option<usize>,

        /// Show each guess's contribution
        #[arg(short, long)]
        verbose: bool,
    },

    /// Benchmark selection on a synthetic population
    Benchmark {
        /// Synthetic population size
        #[arg(short = 'n', long, default_value = "10000")]
        size: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of guesses allowed
        #[arg(short = 'q', long, default_value = "100")]
        rate_limit: usize,
    },
}

/// Load the population selected by the -d flag
fn load_population(dataset: &str) -> Result<Population> {
    match dataset {
        "sample" => Ok(population_from_slice(SAMPLE)),
        path => load_from_file(path).with_context(|| format!("Failed to load dataset {path}")),
    }
}

fn base_config(cli: &Cli, rate_limit: usize) -> SelectConfig {
    let config = SelectConfig::new(rate_limit)
        .with_workers(cli.workers)
        .with_min_length(cli.min_length);
    match &cli.alphabet {
        Some(chars) => config.with_alphabet(Alphabet::new(chars)),
        None => config,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Select {
            rate_limit,
            output,
            no_output,
            initial_ball_size,
            ball_decay,
            verbose,
        } => {
            let config = base_config(&cli, *rate_limit)
                .with_initial_ball_size(*initial_ball_size)
                .with_ball_decay(*ball_decay);
            let output = (!no_output)
                .then(|| output.clone().unwrap_or_else(|| default_report_path(*rate_limit)));
            run_select_command(&cli.dataset, &config, output, *verbose)
        }
        Commands::Evaluate {
            guesses,
            rate_limit,
            verbose,
        } => run_evaluate_command(&cli, guesses, *rate_limit, *verbose),
        Commands::Benchmark {
            size,
            seed,
            rate_limit,
        } => {
            println!(
                "Running benchmark: {rate_limit} guesses over {size} synthetic passwords (seed {seed})..."
            );
            let config = base_config(&cli, *rate_limit);
            let result = run_benchmark(*size, *seed, &config).map_err(|e| anyhow::anyhow!(e))?;
            print_benchmark_result(&result);
            Ok(())
        }
    }
}

fn run_select_command(
    dataset: &str,
    config: &SelectConfig,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let population = load_population(dataset)?;
    println!(
        "Loaded {} passwords ({} accounts)",
        population.len(),
        population.total_frequency()
    );

    let progress = CliProgress::new(config.rate_limit, verbose);
    let result = run_select(&population, config, &progress).map_err(|e| anyhow::anyhow!(e))?;
    progress.finish();

    print_selection_result(&result, config.rate_limit);

    if let Some(path) = output {
        let report = SelectionReport::new(config.rate_limit, &result);
        write_report(&path, &report)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("\n💾 Saved guess list to {}", path.display().to_string().bright_white());
    }
    Ok(())
}

fn run_evaluate_command(
    cli: &Cli,
    guesses_path: &Path,
    rate_limit: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let population = load_population(&cli.dataset)?;
    let guesses = read_guesses(guesses_path)
        .with_context(|| format!("Failed to read guesses from {}", guesses_path.display()))?;

    let config = base_config(cli, rate_limit.unwrap_or(guesses.len()));
    let result =
        evaluate_guesses(&population, &guesses, &config).map_err(|e| anyhow::anyhow!(e))?;
    print_evaluation_result(&result, verbose);
    Ok(())
}
