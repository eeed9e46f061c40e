//! Tournament state singleton and error type.

use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Default number of Swiss rounds when nothing else has been configured.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

/// Whether the event is still running.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    #[default]
    InProgress,
    Finished,
}

/// The single tournament record: current round, round count, status.
///
/// Created lazily with `Default` on first read. Written only by the
/// controller; round generation upserts it so it stays consistent with
/// whatever matches exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub current_round: u32,
    /// Swiss round count. Round-robin overwrites this with its own total.
    pub total_rounds: u32,
    pub status: TournamentStatus,
}

impl Default for TournamentState {
    fn default() -> Self {
        Self {
            current_round: 1,
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            status: TournamentStatus::InProgress,
        }
    }
}

impl TournamentState {
    pub fn is_finished(&self) -> bool {
        self.status == TournamentStatus::Finished
    }
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Persistence failure; durable state may not match what the caller expects.
    Store(StoreError),
    /// Round number that cannot be paired or advanced to (rounds start at 1).
    InvalidRound(u32),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Store(e) => write!(f, "store failure: {}", e),
            TournamentError::InvalidRound(r) => write!(f, "invalid round number: {}", r),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for TournamentError {
    fn from(e: StoreError) -> Self {
        TournamentError::Store(e)
    }
}
