//! Fairness violation counters.
//!
//! Each counter scans a whole tournament and returns how many units of
//! deviation it found from one target constraint:
//!
//! - double round-robin: every directed game is played exactly once
//! - no repeat: no pairing meets again in the very next round
//! - max streak: no team hosts (or visits) more than `max_streak` rounds in a row
//!
//! Violations are counted per occurrence, never capped per tournament.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Game, Tournament};

/// Consecutive-round counters for one team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakState {
    pub home: u32,
    pub away: u32,
}

impl StreakState {
    /// Record a home game and return the new home streak.
    pub fn play_home(&mut self) -> u32 {
        self.home += 1;
        self.away = 0;
        self.home
    }

    /// Record an away game and return the new away streak.
    pub fn play_away(&mut self) -> u32 {
        self.away += 1;
        self.home = 0;
        self.away
    }
}

/// Sum of `|1 - count|` over every directed game, where `count` is how often
/// that game occurs anywhere in the tournament.
pub fn double_round_robin_violations(tournament: &Tournament, team_count: usize) -> u64 {
    let mut occurrences: HashMap<Game, u64> = HashMap::new();
    for &game in tournament.games() {
        *occurrences.entry(game).or_insert(0) += 1;
    }

    let mut violations = 0;
    for i in 0..team_count {
        for j in (i + 1)..team_count {
            for game in [Game::new(i, j), Game::new(j, i)] {
                let count = occurrences.get(&game).copied().unwrap_or(0);
                violations += count.abs_diff(1);
            }
        }
    }
    violations
}

/// Immediate rematches between adjacent rounds.
///
/// The same orientation and the reversed orientation are checked
/// independently, so one game can add at most 2.
pub fn no_repeat_violations(tournament: &Tournament) -> u64 {
    let mut violations = 0;
    for pair in tournament.rounds.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        for &game in current.iter() {
            if next.contains(game) {
                violations += 1;
            }
            if next.contains(game.reversed()) {
                violations += 1;
            }
        }
    }
    violations
}

/// Every round in which a team extends a home or away streak beyond
/// `max_streak` counts once.
pub fn max_streak_violations(tournament: &Tournament, team_count: usize, max_streak: u32) -> u64 {
    let mut streaks = vec![StreakState::default(); team_count];
    let mut violations = 0;
    for round in &tournament.rounds {
        for game in round.iter() {
            if streaks[game.host].play_home() > max_streak {
                violations += 1;
            }
            if streaks[game.guest].play_away() > max_streak {
                violations += 1;
            }
        }
    }
    violations
}

/// Results of all three counters for one tournament.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub max_streak: u64,
    pub double_round_robin: u64,
    pub no_repeat: u64,
}

pub fn count_all(tournament: &Tournament, team_count: usize, max_streak: u32) -> ViolationCounts {
    ViolationCounts {
        max_streak: max_streak_violations(tournament, team_count, max_streak),
        double_round_robin: double_round_robin_violations(tournament, team_count),
        no_repeat: no_repeat_violations(tournament),
    }
}

#[cfg(test)]
#[path = "violations_tests.rs"]
mod violations_tests;
