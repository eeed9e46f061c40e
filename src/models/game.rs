//! Match, Seat (player-or-bye), and MatchResult.

use crate::models::player::PlayerId;
use crate::models::points::Points;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Table number sentinel for bye rows: sorts after every real table.
pub const BYE_TABLE: u32 = 999;

/// One side of a match: a real player, or the bye slot.
///
/// Byes are a proper variant rather than a reserved player id, so a bye row
/// can never collide with a real player lookup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player(PlayerId),
    Bye,
}

impl Seat {
    /// The player id if this seat holds a real player.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Seat::Player(id) => Some(id),
            Seat::Bye => None,
        }
    }
}

/// Outcome of a played match, in standard chess notation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "1-0")]
    WhiteWin,
    #[serde(rename = "0-1")]
    BlackWin,
    #[serde(rename = "1/2-1/2")]
    Draw,
}

impl MatchResult {
    /// Points awarded to the white side.
    pub fn white_points(self) -> Points {
        match self {
            MatchResult::WhiteWin => Points::ONE,
            MatchResult::BlackWin => Points::ZERO,
            MatchResult::Draw => Points::HALF,
        }
    }

    /// Points awarded to the black side.
    pub fn black_points(self) -> Points {
        match self {
            MatchResult::WhiteWin => Points::ZERO,
            MatchResult::BlackWin => Points::ONE,
            MatchResult::Draw => Points::HALF,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchResult::WhiteWin => "1-0",
            MatchResult::BlackWin => "0-1",
            MatchResult::Draw => "1/2-1/2",
        };
        f.write_str(s)
    }
}

/// A single pairing in a round: two seats, a table, and an optional result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    /// Display seating order within the round. `BYE_TABLE` for bye rows.
    pub table: u32,
    pub white: Seat,
    pub black: Seat,
    /// None until the game is played.
    pub result: Option<MatchResult>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn new(white: PlayerId, black: PlayerId, round: u32, table: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            table,
            white: Seat::Player(white),
            black: Seat::Player(black),
            result: None,
            created_at: Utc::now(),
        }
    }

    /// A bye row: one real player, no opponent, never gets a result.
    pub fn bye(player: PlayerId, round: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            table: BYE_TABLE,
            white: Seat::Player(player),
            black: Seat::Bye,
            result: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.white == Seat::Bye || self.black == Seat::Bye
    }

    /// Real player ids on this match (1 for a bye row, 2 otherwise).
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        [self.white, self.black].into_iter().filter_map(Seat::player)
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.white == Seat::Player(id) || self.black == Seat::Player(id)
    }

    /// The other seat, if `id` plays in this match.
    pub fn opponent_of(&self, id: PlayerId) -> Option<Seat> {
        if self.white == Seat::Player(id) {
            Some(self.black)
        } else if self.black == Seat::Player(id) {
            Some(self.white)
        } else {
            None
        }
    }
}
