//! Teams, games, rounds and tournaments.

use serde::{Deserialize, Serialize};

/// Team identifier in `0..team_count`.
pub type Team = usize;

/// Canonical identifier of a directed game, in `0..games_for(team_count)`.
pub type GameId = usize;

/// Number of rounds in a double round-robin over `team_count` teams.
pub fn rounds_for(team_count: usize) -> usize {
    2 * (team_count - 1)
}

/// Number of distinct directed games (ordered host/guest pairs).
pub fn games_for(team_count: usize) -> usize {
    team_count * (team_count - 1)
}

pub fn games_per_round(team_count: usize) -> usize {
    team_count / 2
}

/// A directed game: `host` plays at home against `guest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Game {
    pub host: Team,
    pub guest: Team,
}

impl Game {
    pub fn new(host: Team, guest: Team) -> Self {
        Self { host, guest }
    }

    /// The same pairing with home and away swapped.
    pub fn reversed(self) -> Game {
        Game {
            host: self.guest,
            guest: self.host,
        }
    }
}

impl From<(Team, Team)> for Game {
    fn from((host, guest): (Team, Team)) -> Self {
        Game::new(host, guest)
    }
}

/// One round: a perfect pairing of all teams into directed games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub games: Vec<Game>,
}

impl Round {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn contains(&self, game: Game) -> bool {
        self.games.contains(&game)
    }

    /// True if every team in `0..team_count` plays exactly one game.
    pub fn covers_all_teams(&self, team_count: usize) -> bool {
        if self.games.len() * 2 != team_count {
            return false;
        }
        let mut seen = vec![false; team_count];
        for game in &self.games {
            for team in [game.host, game.guest] {
                if team >= team_count || seen[team] {
                    return false;
                }
                seen[team] = true;
            }
        }
        seen.iter().all(|&s| s)
    }
}

/// An ordered sequence of rounds.
///
/// Randomly generated tournaments carry no constraint between rounds;
/// hand-built ones (test fixtures) may be anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub rounds: Vec<Round>,
}

impl Tournament {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    /// Build a tournament from `(host, guest)` pairs, one slice per round.
    pub fn from_pairs(rounds: &[&[(Team, Team)]]) -> Self {
        Self {
            rounds: rounds
                .iter()
                .map(|pairs| Round::new(pairs.iter().copied().map(Game::from).collect()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// All games of all rounds, in round order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.rounds.iter().flat_map(|round| round.games.iter())
    }
}
