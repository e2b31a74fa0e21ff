//! Experiment configuration and the grid of configurations to sweep

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ExperimentError, Result};

pub const DEFAULT_REPETITIONS: u64 = 1_000;
pub const DEFAULT_SEED: u64 = 1;

/// One unit of parallel work: a team count and streak threshold, repeated
/// `repetitions` times from a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub team_count: usize,
    pub repetitions: u64,
    pub max_streak: u32,
    pub seed: u64,
}

impl ExperimentConfig {
    pub fn new(team_count: usize, repetitions: u64, max_streak: u32) -> Self {
        Self {
            team_count,
            repetitions,
            max_streak,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the generators cannot handle.
    ///
    /// Zero repetitions are allowed here and simply produce empty
    /// histograms; batches are stricter, see [`GridConfig::validate`].
    pub fn validate(&self) -> Result<()> {
        if self.team_count < 2 || self.team_count % 2 != 0 {
            return Err(ExperimentError::InvalidTeamCount(self.team_count));
        }
        if self.max_streak == 0 {
            return Err(ExperimentError::InvalidMaxStreak(self.max_streak));
        }
        Ok(())
    }

    /// Short label used for progress bars and log lines
    pub fn label(&self) -> String {
        format!("teams:{} streak:{}", self.team_count, self.max_streak)
    }
}

/// The cartesian grid of team counts and streak thresholds for one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub team_counts: Vec<usize>,
    pub max_streaks: Vec<u32>,
    pub repetitions: u64,
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            team_counts: (4..52).step_by(2).collect(),
            max_streaks: (1..6).collect(),
            repetitions: DEFAULT_REPETITIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl GridConfig {
    /// Every configuration in the grid, team counts outermost.
    ///
    /// All configurations share the grid seed, so each one is reproducible
    /// on its own.
    pub fn configs(&self) -> Vec<ExperimentConfig> {
        self.team_counts
            .iter()
            .flat_map(|&team_count| {
                self.max_streaks.iter().map(move |&max_streak| ExperimentConfig {
                    team_count,
                    repetitions: self.repetitions,
                    max_streak,
                    seed: self.seed,
                })
            })
            .collect()
    }

    /// Fail fast on anything that would make the batch meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.team_counts.is_empty() {
            return Err(ExperimentError::EmptyGrid("no team counts"));
        }
        if self.max_streaks.is_empty() {
            return Err(ExperimentError::EmptyGrid("no max streak thresholds"));
        }
        if self.repetitions == 0 {
            return Err(ExperimentError::InvalidRepetitions(self.repetitions));
        }
        let mut seen = HashSet::new();
        for config in self.configs() {
            config.validate()?;
            if !seen.insert((config.team_count, config.max_streak)) {
                return Err(ExperimentError::DuplicateConfiguration {
                    team_count: config.team_count,
                    max_streak: config.max_streak,
                });
            }
        }
        Ok(())
    }

    /// Load a grid from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save the grid to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
