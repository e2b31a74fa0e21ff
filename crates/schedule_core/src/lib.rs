//! Random round-robin schedules and the fairness constraints they break.
//!
//! - [`GameCodec`] maps directed team pairs to dense game ids and back
//! - [`RoundGenerator`] / [`TournamentGenerator`] draw uniformly random schedules
//! - [`violations`] counts double round-robin, rematch and streak violations

pub mod codec;
pub mod generator;
pub mod types;
pub mod violations;

pub use codec::GameCodec;
pub use generator::{RoundGenerator, TournamentGenerator};
pub use types::*;
pub use violations::{
    count_all, double_round_robin_violations, max_streak_violations, no_repeat_violations,
    StreakState, ViolationCounts,
};
