//! Tournament business logic: pairing, scheduling, scoring, round control.

mod controller;
mod round_robin;
mod standings;
mod swiss;

pub use controller::{
    advance_round, current_standings, finish_tournament, reset_tournament, start_round_robin,
    start_swiss_round,
};
pub use round_robin::{generate_round_robin_schedule, RoundRobinSchedule};
pub use standings::{compute_standings, score_round, ScoreDelta, Standing};
pub use swiss::{generate_swiss_pairings, Pairing, PairingSet};
