use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParsePlayerIdError;

/// Identifies which physical player the bot is acting as.
///
/// The game-control layer addresses players as `"1"` and `"2"`; parsing and
/// display round-trip through those strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PlayerId {
    #[display("1")]
    One,
    #[display("2")]
    Two,
}

impl PlayerId {
    /// Returns the other player.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl FromStr for PlayerId {
    type Err = ParsePlayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(PlayerId::One),
            "2" => Ok(PlayerId::Two),
            _ => Err(ParsePlayerIdError),
        }
    }
}

/// Per-player situation at one frame, as reported by the game process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x_coord: i32,
    pub y_coord: i32,
    pub health: i32,
    pub is_jumping: bool,
    pub is_crouching: bool,
    pub is_in_move: bool,
    pub move_id: i32,
}

/// One frame of match state for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player1: PlayerSnapshot,
    pub player2: PlayerSnapshot,
    /// Remaining round time as shown on the in-game timer.
    pub timer: u32,
}

impl GameSnapshot {
    /// Returns the snapshot of the given player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerSnapshot {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    /// Returns a copy with the two players' snapshots swapped.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            player1: self.player2,
            player2: self.player1,
            timer: self.timer,
        }
    }
}
