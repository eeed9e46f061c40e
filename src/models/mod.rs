//! Data structures for the chess tournament: players, matches, points, state.

mod game;
mod player;
mod points;
mod tournament;

pub use game::{Match, MatchId, MatchResult, Seat, BYE_TABLE};
pub use player::{Player, PlayerId, RegistrationStatus};
pub use points::Points;
pub use tournament::{
    TournamentError, TournamentState, TournamentStatus, DEFAULT_TOTAL_ROUNDS,
};
