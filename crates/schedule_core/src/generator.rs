//! Uniformly random round and tournament generation.
//!
//! This is the naive baseline: every round is an independent random perfect
//! matching, with no attempt to respect any constraint across rounds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::codec::GameCodec;
use crate::types::{games_per_round, rounds_for, GameId, Round, Team, Tournament};

/// Draws one random perfect pairing of all teams.
#[derive(Clone, Copy, Debug)]
pub struct RoundGenerator {
    codec: GameCodec,
}

impl RoundGenerator {
    pub fn new(team_count: usize) -> Self {
        debug_assert!(team_count % 2 == 0, "round generation needs an even team count");
        Self {
            codec: GameCodec::new(team_count),
        }
    }

    pub fn team_count(&self) -> usize {
        self.codec.team_count()
    }

    /// Shuffle the teams, pair them off in order and resolve every pair
    /// through the codec. Games come out sorted by id.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Round {
        let mut teams: Vec<Team> = (0..self.team_count()).collect();
        teams.shuffle(rng);

        let mut ids: Vec<GameId> = Vec::with_capacity(games_per_round(self.team_count()));
        for pair in teams.chunks_exact(2) {
            ids.push(self.codec.encode(pair[0], pair[1]));
        }
        ids.sort_unstable();

        Round::new(ids.into_iter().map(|id| self.codec.decode(id)).collect())
    }
}

/// Composes `2 * (n - 1)` independent rounds into a tournament.
#[derive(Clone, Copy, Debug)]
pub struct TournamentGenerator {
    rounds: RoundGenerator,
}

impl TournamentGenerator {
    pub fn new(team_count: usize) -> Self {
        Self {
            rounds: RoundGenerator::new(team_count),
        }
    }

    pub fn team_count(&self) -> usize {
        self.rounds.team_count()
    }

    pub fn round_count(&self) -> usize {
        rounds_for(self.team_count())
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Tournament {
        Tournament::new(
            (0..self.round_count())
                .map(|_| self.rounds.generate(rng))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
