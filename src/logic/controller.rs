//! Tournament controller: the state machine tying pairing, scoring, and
//! standings together against the backing store.

use crate::logic::round_robin::generate_round_robin_schedule;
use crate::logic::standings::{compute_standings, score_round, Standing};
use crate::logic::swiss::{generate_swiss_pairings, PairingSet};
use crate::models::{
    Match, PlayerId, Points, RegistrationStatus, TournamentError, TournamentState,
    TournamentStatus,
};
use crate::store::Store;
use rand::Rng;

/// Advance to the next round.
///
/// Scores the round just finished, recomputes standings, then either ends the
/// tournament (when the round count is exhausted) or generates and persists
/// Swiss pairings for the next round. Scoring is durably applied before the
/// pairing step reads players, so seeding always sees fresh scores.
///
/// Advancing a finished tournament is a no-op returning the current state:
/// that is steady-state behavior, not a fault, and it is also what guarantees
/// no round is ever scored twice.
pub fn advance_round<S: Store, R: Rng>(
    store: &mut S,
    rng: &mut R,
) -> Result<TournamentState, TournamentError> {
    let state = store.tournament_state()?;
    if state.is_finished() {
        log::info!("advance_round: tournament already finished, nothing to do");
        return Ok(state);
    }

    apply_round_scores(store, state.current_round)?;
    persist_standings(store)?;

    let next = state.current_round + 1;
    if next > state.total_rounds {
        let finished = TournamentState {
            status: TournamentStatus::Finished,
            ..state
        };
        store.save_tournament_state(&finished)?;
        store.invalidate_cache();
        log::info!(
            "tournament finished after round {}/{}",
            state.current_round,
            state.total_rounds
        );
        return Ok(finished);
    }

    // Idempotent cleanup: a partially-retried advance may have left round
    // `next` matches (and a bye award) behind.
    clear_round(store, next)?;

    let players = store.list_players(Some(RegistrationStatus::Approved))?;
    let history = store.list_matches(None)?;
    let set = generate_swiss_pairings(&players, &history, false, rng);
    commit_pairings(store, &set, next)?;

    let advanced = TournamentState {
        current_round: next,
        ..state
    };
    store.save_tournament_state(&advanced)?;
    store.invalidate_cache();
    log::info!(
        "advanced to round {}/{} ({} pairings, bye: {})",
        next,
        advanced.total_rounds,
        set.pairings.len(),
        set.bye.is_some()
    );
    Ok(advanced)
}

/// End the tournament now, scoring the current round first.
///
/// Already-finished tournaments are left untouched so a repeated call cannot
/// score the final round a second time.
pub fn finish_tournament<S: Store>(store: &mut S) -> Result<TournamentState, TournamentError> {
    let state = store.tournament_state()?;
    if state.is_finished() {
        log::info!("finish_tournament: already finished, nothing to do");
        return Ok(state);
    }

    apply_round_scores(store, state.current_round)?;
    persist_standings(store)?;

    let finished = TournamentState {
        status: TournamentStatus::Finished,
        ..state
    };
    store.save_tournament_state(&finished)?;
    store.invalidate_cache();
    log::info!("tournament finished early at round {}", state.current_round);
    Ok(finished)
}

/// Wipe all matches, zero every player's score and rank, and go back to
/// round 1. Available from any state.
pub fn reset_tournament<S: Store>(store: &mut S) -> Result<TournamentState, TournamentError> {
    let state = store.tournament_state()?;
    store.clear_matches()?;
    store.reset_player_stats()?;
    let fresh = TournamentState {
        current_round: 1,
        status: TournamentStatus::InProgress,
        ..state
    };
    store.save_tournament_state(&fresh)?;
    store.invalidate_cache();
    log::info!("tournament reset to round 1");
    Ok(fresh)
}

/// Generate (or regenerate) Swiss pairings for a specific round and set
/// `current_round` to it. Round 1 pairs from a shuffled pool.
///
/// Fewer than 2 eligible players yields an empty result and leaves all
/// durable state untouched.
pub fn start_swiss_round<S: Store, R: Rng>(
    store: &mut S,
    rng: &mut R,
    round: u32,
) -> Result<Vec<Match>, TournamentError> {
    if round == 0 {
        return Err(TournamentError::InvalidRound(round));
    }

    let players = store.list_players(Some(RegistrationStatus::Approved))?;
    if players.len() < 2 {
        log::warn!("swiss round {}: fewer than 2 eligible players", round);
        return Ok(Vec::new());
    }

    clear_round(store, round)?;
    let history = store.list_matches(None)?;
    let set = generate_swiss_pairings(&players, &history, round == 1, rng);
    let created = commit_pairings(store, &set, round)?;

    let mut state = store.tournament_state()?;
    state.current_round = round;
    store.save_tournament_state(&state)?;
    store.invalidate_cache();
    log::info!(
        "generated round {}: {} pairings, bye: {}",
        round,
        set.pairings.len(),
        set.bye.is_some()
    );
    Ok(created)
}

/// Replace everything with a complete round-robin schedule.
///
/// The schedule's round count overwrites the configured Swiss total, and the
/// tournament restarts at round 1. Fewer than 2 eligible players yields an
/// empty result and leaves all durable state untouched.
pub fn start_round_robin<S: Store, R: Rng>(
    store: &mut S,
    rng: &mut R,
) -> Result<Vec<Match>, TournamentError> {
    let players = store.list_players(Some(RegistrationStatus::Approved))?;
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let schedule = generate_round_robin_schedule(&ids, rng);
    if schedule.is_empty() {
        log::warn!("round robin: fewer than 2 eligible players");
        return Ok(Vec::new());
    }

    store.clear_matches()?;
    store.reset_player_stats()?;
    let mut created = Vec::new();
    for (i, set) in schedule.rounds.iter().enumerate() {
        created.extend(commit_pairings(store, set, (i + 1) as u32)?);
    }

    let mut state = store.tournament_state()?;
    state.current_round = 1;
    state.total_rounds = schedule.total_rounds;
    state.status = TournamentStatus::InProgress;
    store.save_tournament_state(&state)?;
    store.invalidate_cache();
    log::info!(
        "generated round-robin schedule: {} rounds, {} rows",
        schedule.total_rounds,
        created.len()
    );
    Ok(created)
}

/// Current standings of the approved players, without writing anything.
pub fn current_standings<S: Store>(store: &mut S) -> Result<Vec<Standing>, TournamentError> {
    let players = store.list_players(Some(RegistrationStatus::Approved))?;
    let matches = store.list_matches(None)?;
    Ok(compute_standings(&players, &matches))
}

/// Persist one round's proposed pairings: numbered tables for real games,
/// then the bye row (sentinel table) with its half-point award.
fn commit_pairings<S: Store>(
    store: &mut S,
    set: &PairingSet,
    round: u32,
) -> Result<Vec<Match>, TournamentError> {
    let mut rows: Vec<Match> = set
        .pairings
        .iter()
        .enumerate()
        .map(|(i, p)| Match::new(p.white, p.black, round, (i + 1) as u32))
        .collect();
    if let Some(bye_player) = set.bye {
        rows.push(Match::bye(bye_player, round));
    }
    store.create_matches(&rows)?;
    if let Some(bye_player) = set.bye {
        store.increment_player_score(bye_player, Points::HALF)?;
    }
    Ok(rows)
}

/// Delete a round's match rows, first taking back the half point any bye row
/// of that round awarded. Without the reversal, every regeneration of an
/// odd-pool round would stack another bye award onto some player.
fn clear_round<S: Store>(store: &mut S, round: u32) -> Result<(), TournamentError> {
    let matches = store.list_matches(Some(round))?;
    for row in matches.iter().filter(|m| m.is_bye()) {
        if let Some(id) = row.players().next() {
            let player = store.get_player(id)?;
            store.update_player_score(id, player.score.saturating_sub(Points::HALF))?;
        }
    }
    store.delete_matches_for_round(round)?;
    Ok(())
}

/// Apply one round's point awards to player scores.
fn apply_round_scores<S: Store>(store: &mut S, round: u32) -> Result<(), TournamentError> {
    let matches = store.list_matches(Some(round))?;
    for delta in score_round(&matches) {
        store.increment_player_score(delta.player_id, delta.points)?;
    }
    Ok(())
}

/// Recompute and write ranks for all approved players.
fn persist_standings<S: Store>(store: &mut S) -> Result<(), TournamentError> {
    let players = store.list_players(Some(RegistrationStatus::Approved))?;
    let matches = store.list_matches(None)?;
    for standing in compute_standings(&players, &matches) {
        store.update_player_rank(standing.player_id, Some(standing.rank))?;
    }
    Ok(())
}
