//! Common types used throughout the ladder

use crate::error::LadderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical (lowercase) player identifier
pub type PlayerId = String;

/// Rating of every player that has played at least one match
pub type PlayerRatings = BTreeMap<PlayerId, f64>;

/// Win/loss record of every player that has played at least one match
pub type PlayerStats = BTreeMap<PlayerId, PlayerRecord>;

/// Normalize a raw player name into its canonical identifier.
///
/// Names are case-insensitive, so `"Alice"` and `" alice "` collide.
pub fn normalize_player_id(raw: &str) -> PlayerId {
    raw.trim().to_lowercase()
}

/// Characters that would break the one-line-per-match log format
pub const RESERVED_NAME_CHARS: [char; 3] = [',', '\n', '\r'];

/// Which side of a match won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
}

impl TryFrom<u8> for Winner {
    type Error = LadderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Winner::PlayerOne),
            2 => Ok(Winner::PlayerTwo),
            other => Err(LadderError::InvalidMatch {
                reason: format!("winner must be 1 or 2, got {}", other),
            }),
        }
    }
}

impl From<Winner> for u8 {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::PlayerOne => 1,
            Winner::PlayerTwo => 2,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Result of a match from one participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Score used by the rating formula (1 for a win, 0 for a loss)
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
        }
    }
}

/// A single recorded head-to-head match.
///
/// Fields are private so every match goes through [`Match::new`], which
/// normalizes both player ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    player1: PlayerId,
    player2: PlayerId,
    winner: Winner,
    day: u32,
}

impl Match {
    /// Create a match, normalizing both names.
    ///
    /// Fails if a name is empty or both names refer to the same player.
    pub fn new(
        player1: &str,
        player2: &str,
        winner: Winner,
        day: u32,
    ) -> Result<Self, LadderError> {
        let player1 = normalize_player_id(player1);
        let player2 = normalize_player_id(player2);

        if player1.is_empty() || player2.is_empty() {
            return Err(LadderError::InvalidMatch {
                reason: "player names cannot be empty".to_string(),
            });
        }
        if let Some(name) = [&player1, &player2]
            .into_iter()
            .find(|name| name.contains(RESERVED_NAME_CHARS))
        {
            return Err(LadderError::InvalidMatch {
                reason: format!(
                    "player name {:?} cannot contain commas or line breaks",
                    name
                ),
            });
        }
        if player1 == player2 {
            return Err(LadderError::InvalidMatch {
                reason: format!("player '{}' cannot play against themselves", player1),
            });
        }

        Ok(Self {
            player1,
            player2,
            winner,
            day,
        })
    }

    pub fn player1(&self) -> &PlayerId {
        &self.player1
    }

    pub fn player2(&self) -> &PlayerId {
        &self.player2
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Days since the season start
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Outcome for `player1`
    pub fn outcome_for_player1(&self) -> Outcome {
        match self.winner {
            Winner::PlayerOne => Outcome::Win,
            Winner::PlayerTwo => Outcome::Loss,
        }
    }
}

/// Cumulative win/loss counts for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub won: u32,
    pub lost: u32,
}

impl PlayerRecord {
    pub fn total(&self) -> u32 {
        self.won + self.lost
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Loss => self.lost += 1,
        }
    }
}
