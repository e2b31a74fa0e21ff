//! Aggregated results storage and reporting

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ExperimentError, Result};
use crate::histogram::Histogram;
use crate::runner::{ExperimentOutcome, ViolationHistograms};

const MAX_STREAK_PREFIX: &str = "maxStreak=";
const TEAMS_PREFIX: &str = "teams=";

/// Histograms of every configuration in a batch, keyed by streak threshold
/// and then by team count.
///
/// Each configuration owns a disjoint slot, so building the aggregate does
/// not depend on the order outcomes arrive in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AggregateFile", into = "AggregateFile")]
pub struct AggregateResult {
    pub by_max_streak: BTreeMap<u32, BTreeMap<usize, ViolationHistograms>>,
}

/// On-disk layout: `{"maxStreak=K": {"teams=N": {...histograms}}}`
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateFile(pub BTreeMap<String, BTreeMap<String, ViolationHistograms>>);

impl From<AggregateResult> for AggregateFile {
    fn from(aggregate: AggregateResult) -> Self {
        AggregateFile(
            aggregate
                .by_max_streak
                .into_iter()
                .map(|(max_streak, by_teams)| {
                    let by_teams = by_teams
                        .into_iter()
                        .map(|(teams, histograms)| (format!("{TEAMS_PREFIX}{teams}"), histograms))
                        .collect();
                    (format!("{MAX_STREAK_PREFIX}{max_streak}"), by_teams)
                })
                .collect(),
        )
    }
}

impl TryFrom<AggregateFile> for AggregateResult {
    type Error = String;

    fn try_from(file: AggregateFile) -> std::result::Result<Self, Self::Error> {
        let mut by_max_streak = BTreeMap::new();
        for (streak_key, by_teams) in file.0 {
            let max_streak: u32 = parse_key(&streak_key, MAX_STREAK_PREFIX)?;
            let mut slot = BTreeMap::new();
            for (teams_key, histograms) in by_teams {
                let teams: usize = parse_key(&teams_key, TEAMS_PREFIX)?;
                slot.insert(teams, histograms);
            }
            by_max_streak.insert(max_streak, slot);
        }
        Ok(AggregateResult { by_max_streak })
    }
}

fn parse_key<T: std::str::FromStr>(key: &str, prefix: &str) -> std::result::Result<T, String> {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.parse().ok())
        .ok_or_else(|| format!("Invalid key '{}', expected '{}<number>'", key, prefix))
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce outcomes in whatever order they come
    pub fn from_outcomes<I>(outcomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = ExperimentOutcome>,
    {
        let mut aggregate = Self::new();
        for outcome in outcomes {
            aggregate.insert(outcome)?;
        }
        Ok(aggregate)
    }

    /// Place an outcome in its slot. A slot is never overwritten.
    pub fn insert(&mut self, outcome: ExperimentOutcome) -> Result<()> {
        let config = outcome.config;
        let slot = self.by_max_streak.entry(config.max_streak).or_default();
        if slot.contains_key(&config.team_count) {
            return Err(ExperimentError::DuplicateConfiguration {
                team_count: config.team_count,
                max_streak: config.max_streak,
            });
        }
        slot.insert(config.team_count, outcome.histograms);
        Ok(())
    }

    pub fn get(&self, max_streak: u32, team_count: usize) -> Option<&ViolationHistograms> {
        self.by_max_streak.get(&max_streak)?.get(&team_count)
    }

    /// Number of configurations held
    pub fn len(&self) -> usize {
        self.by_max_streak.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Random schedule violations ({} configurations) ===\n\n",
            self.len()
        ));
        report.push_str(&format!(
            "{:>6} {:>6} {:>8} | {:>24} | {:>24} | {:>24}\n",
            "streak", "teams", "reps", "max streak", "no repeat", "double round-robin"
        ));
        report.push_str(&"-".repeat(104));
        report.push('\n');

        for (max_streak, by_teams) in &self.by_max_streak {
            for (teams, histograms) in by_teams {
                report.push_str(&format!(
                    "{:>6} {:>6} {:>8} | {:>24} | {:>24} | {:>24}\n",
                    max_streak,
                    teams,
                    histograms.max_streak_violations.total(),
                    summary_cell(&histograms.max_streak_violations),
                    summary_cell(&histograms.no_repeat_violations),
                    summary_cell(&histograms.double_round_robin_violations),
                ));
            }
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

fn summary_cell(histogram: &Histogram) -> String {
    match histogram.summary() {
        Some(s) => format!("{:.2} [{}..{}]", s.mean, s.min, s.max),
        None => "-".to_string(),
    }
}

/// Writes per-run and per-batch result files into one directory.
///
/// All files of a batch share the timestamp captured when the writer was
/// created.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    dir: PathBuf,
    timestamp: String,
}

impl ResultWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_timestamp(dir, Local::now().format("%Y%m%d-%H%M").to_string())
    }

    pub fn with_timestamp(dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn outcome_path(&self, outcome: &ExperimentOutcome) -> PathBuf {
        let c = &outcome.config;
        self.dir.join(format!(
            "{}-{}teams-{}reps-maxStreak{}.json",
            self.timestamp, c.team_count, c.repetitions, c.max_streak
        ))
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.dir.join(format!("{}-all-results.json", self.timestamp))
    }

    /// Write the three histograms of one configuration
    pub fn save_outcome(&self, outcome: &ExperimentOutcome) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.outcome_path(outcome);
        let json = serde_json::to_string_pretty(&outcome.histograms)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Write the combined file for the whole batch
    pub fn save_aggregate(&self, aggregate: &AggregateResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.aggregate_path();
        aggregate.save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
