//! Player data structure and registration lifecycle.

use crate::models::points::Points;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Registration lifecycle of a player. Only approved players are paired.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
    /// Externally-sourced skill estimate (e.g. Chess.com / Lichess rating).
    pub rating: u32,
    pub status: RegistrationStatus,
    /// Cumulative tournament score. Written only by the scoring path.
    pub score: Points,
    /// 1-based standing, assigned by the standings calculator. None until ranked.
    pub rank: Option<u32>,
    pub registered_at: DateTime<Utc>,
}

impl Player {
    /// Register a new player (status Pending, no score or rank yet).
    pub fn new(full_name: impl Into<String>, rating: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            rating,
            status: RegistrationStatus::Pending,
            score: Points::ZERO,
            rank: None,
            registered_at: Utc::now(),
        }
    }

    /// Whether the player can be paired.
    pub fn is_eligible(&self) -> bool {
        self.status == RegistrationStatus::Approved
    }
}
