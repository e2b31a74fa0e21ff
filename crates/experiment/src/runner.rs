//! Runs one experiment configuration: generate, count, record, repeat

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use schedule_core::{count_all, TournamentGenerator, ViolationCounts};

use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::histogram::Histogram;
use crate::progress::ProgressSink;

/// The three violation histograms of one configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationHistograms {
    pub max_streak_violations: Histogram,
    pub no_repeat_violations: Histogram,
    pub double_round_robin_violations: Histogram,
}

impl ViolationHistograms {
    pub fn record(&mut self, counts: ViolationCounts) {
        self.max_streak_violations.record_occurrence(counts.max_streak);
        self.no_repeat_violations.record_occurrence(counts.no_repeat);
        self.double_round_robin_violations
            .record_occurrence(counts.double_round_robin);
    }
}

/// Histograms together with the configuration that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentOutcome {
    pub config: ExperimentConfig,
    pub histograms: ViolationHistograms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Repetitions still to go
    Running { completed: u64 },
    /// All repetitions recorded, histograms final
    Done,
}

/// Repeats generate-and-count for a single configuration.
///
/// The runner owns its random source, seeded once from the configuration,
/// so two runners for the same configuration produce identical histograms
/// regardless of what runs alongside them.
pub struct ExperimentRunner {
    config: ExperimentConfig,
    generator: TournamentGenerator,
    rng: ChaCha8Rng,
    state: RunnerState,
    histograms: ViolationHistograms,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let state = if config.repetitions == 0 {
            RunnerState::Done
        } else {
            RunnerState::Running { completed: 0 }
        };
        Ok(Self {
            config,
            generator: TournamentGenerator::new(config.team_count),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            state,
            histograms: ViolationHistograms::default(),
        })
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Run one repetition. Returns the repetitions completed so far, or
    /// `None` if the runner was already done.
    pub fn step(&mut self) -> Option<u64> {
        let RunnerState::Running { completed } = self.state else {
            return None;
        };

        let tournament = self.generator.generate(&mut self.rng);
        let counts = count_all(&tournament, self.config.team_count, self.config.max_streak);
        self.histograms.record(counts);

        let completed = completed + 1;
        self.state = if completed >= self.config.repetitions {
            RunnerState::Done
        } else {
            RunnerState::Running { completed }
        };
        Some(completed)
    }

    /// Run every remaining repetition, reporting progress after each one
    pub fn run(mut self, progress: &dyn ProgressSink) -> ExperimentOutcome {
        debug!(
            team_count = self.config.team_count,
            max_streak = self.config.max_streak,
            repetitions = self.config.repetitions,
            seed = self.config.seed,
            "starting experiment"
        );

        while let Some(completed) = self.step() {
            progress.advance(completed);
        }
        progress.finish();

        debug!(
            team_count = self.config.team_count,
            max_streak = self.config.max_streak,
            "experiment done"
        );
        ExperimentOutcome {
            config: self.config,
            histograms: self.histograms,
        }
    }
}

/// Validate `config` and run it to completion
pub fn run_experiment(
    config: ExperimentConfig,
    progress: &dyn ProgressSink,
) -> Result<ExperimentOutcome> {
    Ok(ExperimentRunner::new(config)?.run(progress))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
