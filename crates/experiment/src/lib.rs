//! Monte Carlo experiments on random round-robin schedules
//!
//! This crate provides infrastructure for:
//! - Running many random tournaments per (team count, streak threshold)
//! - Collecting violation histograms for each configuration
//! - Sweeping a whole grid of configurations on a worker pool
//! - Saving per-run and combined results as JSON
//!
//! # Usage
//!
//! ```bash
//! # Run the standard sweep (teams 4..=50, thresholds 1..=5, 1000 repetitions)
//! cargo run -p experiment -- run --output output
//!
//! # Run a single configuration
//! cargo run -p experiment -- single --teams 10 --max-streak 2 --repetitions 5000
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod histogram;
pub mod progress;
pub mod results;
pub mod runner;

pub use config::*;
pub use driver::*;
pub use error::{ExperimentError, Result};
pub use histogram::*;
pub use progress::*;
pub use results::*;
pub use runner::*;
