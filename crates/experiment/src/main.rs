//! Experiment CLI
//!
//! Sweep random round-robin schedules over a grid of team counts and streak
//! thresholds, and record how often each fairness constraint is violated.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use experiment::{
    run_experiment, AggregateResult, ExperimentConfig, GridConfig, NoProgress, ParallelDriver,
    ProgressFactory, ResultWriter, TerminalProgress, DEFAULT_REPETITIONS, DEFAULT_SEED,
};

#[derive(Parser)]
#[command(name = "experiment")]
#[command(about = "Measure how far random schedules drift from a fair double round-robin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a grid of configurations in parallel.
    Run {
        /// Grid config file (TOML); flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Team counts (comma-separated, even)
        #[arg(short, long, value_delimiter = ',')]
        teams: Option<Vec<usize>>,
        /// Max streak thresholds (comma-separated, positive)
        #[arg(short, long, value_delimiter = ',')]
        max_streaks: Option<Vec<u32>>,
        /// Repetitions per configuration
        #[arg(short, long)]
        repetitions: Option<u64>,
        /// Seed shared by every configuration
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads (default: one per core)
        #[arg(long)]
        threads: Option<usize>,
        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
        /// Skip the per-configuration files, write only the combined one
        #[arg(long)]
        no_per_run_files: bool,
        /// Hide progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Run a single configuration.
    Single {
        /// Number of teams (even)
        #[arg(short, long)]
        teams: usize,
        /// Max streak threshold
        #[arg(short, long, default_value = "3")]
        max_streak: u32,
        /// Repetitions
        #[arg(short, long, default_value_t = DEFAULT_REPETITIONS)]
        repetitions: u64,
        /// Random seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Write the default grid to a TOML file.
    InitConfig {
        /// Destination path
        #[arg(default_value = "experiment.toml")]
        path: PathBuf,
    },

    /// Print a summary of a saved all-results file.
    Report {
        /// Path to a *-all-results.json file
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn run_grid(
    config: Option<PathBuf>,
    teams: Option<Vec<usize>>,
    max_streaks: Option<Vec<u32>>,
    repetitions: Option<u64>,
    seed: Option<u64>,
    threads: Option<usize>,
    output: PathBuf,
    no_per_run_files: bool,
    no_progress: bool,
) -> Result<()> {
    let mut grid = match &config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("Failed to load grid config {}", path.display()))?,
        None => GridConfig::default(),
    };
    if let Some(teams) = teams {
        grid.team_counts = teams;
    }
    if let Some(max_streaks) = max_streaks {
        grid.max_streaks = max_streaks;
    }
    if let Some(repetitions) = repetitions {
        grid.repetitions = repetitions;
    }
    if let Some(seed) = seed {
        grid.seed = seed;
    }
    grid.validate().context("Invalid experiment grid")?;

    let configs = grid.configs();
    info!(
        configurations = configs.len(),
        repetitions = grid.repetitions,
        seed = grid.seed,
        "running grid"
    );

    let writer = ResultWriter::new(&output);
    let driver = ParallelDriver::new(threads)?;
    let progress: Box<dyn ProgressFactory> = if no_progress {
        Box::new(NoProgress)
    } else {
        Box::new(TerminalProgress::new())
    };

    let aggregate = if no_per_run_files {
        driver.run(&configs, progress.as_ref())?
    } else {
        driver.run_saving(&configs, progress.as_ref(), &writer)?
    };

    let path = writer
        .save_aggregate(&aggregate)
        .context("Failed to save combined results")?;
    aggregate.print_report();
    info!("results saved to {}", path.display());
    Ok(())
}

fn run_single(
    teams: usize,
    max_streak: u32,
    repetitions: u64,
    seed: u64,
    output: PathBuf,
) -> Result<()> {
    let config = ExperimentConfig::new(teams, repetitions, max_streak).with_seed(seed);
    let progress = TerminalProgress::new();
    let sink = progress.sink_for(&config);
    let outcome = run_experiment(config, sink.as_ref())?;

    let path = ResultWriter::new(&output)
        .save_outcome(&outcome)
        .context("Failed to save results")?;

    let aggregate = AggregateResult::from_outcomes([outcome])?;
    aggregate.print_report();
    info!("results saved to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            teams,
            max_streaks,
            repetitions,
            seed,
            threads,
            output,
            no_per_run_files,
            no_progress,
        } => run_grid(
            config,
            teams,
            max_streaks,
            repetitions,
            seed,
            threads,
            output,
            no_per_run_files,
            no_progress,
        ),
        Commands::Single {
            teams,
            max_streak,
            repetitions,
            seed,
            output,
        } => run_single(teams, max_streak, repetitions, seed, output),
        Commands::InitConfig { path } => {
            GridConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote default grid to {}", path.display());
            Ok(())
        }
        Commands::Report { path } => {
            let aggregate = AggregateResult::load(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            aggregate.print_report();
            Ok(())
        }
    }
}
