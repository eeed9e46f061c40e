//! Storage seam: the narrow interface the tournament logic needs from its
//! backing store, plus the in-memory implementation used by the web binary
//! and tests.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Match, MatchId, MatchResult, Player, PlayerId, Points, RegistrationStatus, TournamentState,
};

/// Persistence failures. Distinct from "nothing to do" so callers can retry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    PlayerNotFound(PlayerId),
    MatchNotFound(MatchId),
    /// Backend-specific failure (connection lost, constraint violation, ...).
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::PlayerNotFound(id) => write!(f, "no such player: {}", id),
            StoreError::MatchNotFound(id) => write!(f, "no such match: {}", id),
            StoreError::Backend(msg) => write!(f, "backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Operations the controller and web layer need from the backing store.
///
/// The pairing and standings functions themselves never touch this; they take
/// plain slices and return proposed changes for the controller to commit.
pub trait Store {
    /// Players, optionally filtered by status, sorted by (score desc, rating
    /// desc). This ordering is the Swiss seeding and the standings input order.
    fn list_players(
        &self,
        status: Option<RegistrationStatus>,
    ) -> Result<Vec<Player>, StoreError>;

    fn get_player(&self, id: PlayerId) -> Result<Player, StoreError>;

    fn add_player(&mut self, player: Player) -> Result<(), StoreError>;

    fn update_player_status(
        &mut self,
        id: PlayerId,
        status: RegistrationStatus,
    ) -> Result<(), StoreError>;

    fn update_player_score(&mut self, id: PlayerId, score: Points) -> Result<(), StoreError>;

    fn increment_player_score(&mut self, id: PlayerId, delta: Points) -> Result<(), StoreError>;

    fn update_player_rank(&mut self, id: PlayerId, rank: Option<u32>) -> Result<(), StoreError>;

    /// Bulk reset: every player back to zero score and no rank.
    fn reset_player_stats(&mut self) -> Result<(), StoreError>;

    /// Removes the player and every match referencing them.
    fn delete_player(&mut self, id: PlayerId) -> Result<(), StoreError>;

    /// Matches, optionally filtered by round, ordered by (round, table).
    fn list_matches(&self, round: Option<u32>) -> Result<Vec<Match>, StoreError>;

    /// Bulk insert of freshly generated matches.
    fn create_matches(&mut self, matches: &[Match]) -> Result<(), StoreError>;

    fn set_match_result(&mut self, id: MatchId, result: MatchResult) -> Result<(), StoreError>;

    fn delete_matches_for_round(&mut self, round: u32) -> Result<(), StoreError>;

    fn clear_matches(&mut self) -> Result<(), StoreError>;

    /// The singleton tournament record, created with defaults on first read.
    fn tournament_state(&mut self) -> Result<TournamentState, StoreError>;

    fn save_tournament_state(&mut self, state: &TournamentState) -> Result<(), StoreError>;

    /// Fired after every mutating operation so a cache layer in front of the
    /// store can drop stale reads. The core only calls it; honoring it is the
    /// collaborator's job.
    fn invalidate_cache(&mut self) {}
}
