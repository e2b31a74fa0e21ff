//! Bijection between game identifiers and directed team pairs.
//!
//! For `n` teams every ordered pair `(host, guest)` with `host != guest`
//! gets an id in `0..n*(n-1)`. Ids are laid out host-major, skipping the
//! diagonal so that no id is wasted on a team playing itself:
//!
//! ```text
//! id = host * (n - 1) + guest'     guest' = guest      if guest < host
//!                                  guest' = guest - 1  otherwise
//! ```

use crate::types::{games_for, Game, GameId, Team};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameCodec {
    team_count: usize,
}

impl GameCodec {
    pub fn new(team_count: usize) -> Self {
        debug_assert!(team_count >= 2, "need at least two teams");
        Self { team_count }
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Number of ids, i.e. directed games.
    pub fn id_count(&self) -> usize {
        games_for(self.team_count)
    }

    pub fn encode(&self, host: Team, guest: Team) -> GameId {
        debug_assert!(host != guest, "a team cannot host itself");
        debug_assert!(host < self.team_count && guest < self.team_count);
        let column = if guest < host { guest } else { guest - 1 };
        host * (self.team_count - 1) + column
    }

    pub fn encode_game(&self, game: Game) -> GameId {
        self.encode(game.host, game.guest)
    }

    pub fn decode(&self, id: GameId) -> Game {
        debug_assert!(id < self.id_count(), "game id {} out of range", id);
        let host = id / (self.team_count - 1);
        let column = id % (self.team_count - 1);
        let guest = if column < host { column } else { column + 1 };
        Game { host, guest }
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
