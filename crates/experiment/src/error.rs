//! Error types for experiment configuration, execution and persistence

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("team count must be even and at least 2, got {0}")]
    InvalidTeamCount(usize),

    #[error("repetitions must be positive, got {0}")]
    InvalidRepetitions(u64),

    #[error("max streak threshold must be positive, got {0}")]
    InvalidMaxStreak(u32),

    #[error("experiment grid is empty: {0}")]
    EmptyGrid(&'static str),

    #[error("configuration teams={team_count} maxStreak={max_streak} appears more than once")]
    DuplicateConfiguration { team_count: usize, max_streak: u32 },

    #[error("worker for teams={team_count} maxStreak={max_streak} failed: {message}")]
    WorkerFailure {
        team_count: usize,
        max_streak: u32,
        message: String,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
