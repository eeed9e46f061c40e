//! Chess tournament engine: Swiss pairings, round-robin schedules, scoring,
//! and tie-broken standings, with a storage seam for the surrounding app.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_round, compute_standings, current_standings, finish_tournament,
    generate_round_robin_schedule, generate_swiss_pairings, reset_tournament, score_round,
    start_round_robin, start_swiss_round, Pairing, PairingSet, RoundRobinSchedule, ScoreDelta,
    Standing,
};
pub use models::{
    Match, MatchId, MatchResult, Player, PlayerId, Points, RegistrationStatus, Seat,
    TournamentError, TournamentState, TournamentStatus, BYE_TABLE, DEFAULT_TOTAL_ROUNDS,
};
pub use store::{MemoryStore, Store, StoreError};
