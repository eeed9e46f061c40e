//! Scoring and standings: point awards per round, Buchholz tie-break, ranks.

use crate::models::{Match, Player, PlayerId, Points, Seat};
use std::collections::HashMap;

/// Points one player earned from one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreDelta {
    pub player_id: PlayerId,
    pub points: Points,
}

/// One row of the tie-broken standings table.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Standing {
    pub player_id: PlayerId,
    /// 1-based position after tie-breaks.
    pub rank: u32,
    pub score: Points,
    pub buchholz: Points,
    pub rating: u32,
}

/// Point awards for one round's matches: 1 / 0 / 0.5 per the recorded result.
///
/// Matches without a result are skipped, not assumed drawn. Bye rows are
/// skipped too; their half point is awarded when the row is created. Zero
/// awards are omitted.
///
/// This is a pure per-round delta. Applying the same round's deltas twice
/// double-counts; the controller's state machine only ever scores a round
/// once (the round counter moves strictly forward and terminal states no-op).
pub fn score_round(matches: &[Match]) -> Vec<ScoreDelta> {
    let mut deltas = Vec::new();
    for m in matches {
        let Some(result) = m.result else { continue };
        if let Seat::Player(id) = m.white {
            let points = result.white_points();
            if !points.is_zero() {
                deltas.push(ScoreDelta { player_id: id, points });
            }
        }
        if let Seat::Player(id) = m.black {
            let points = result.black_points();
            if !points.is_zero() {
                deltas.push(ScoreDelta { player_id: id, points });
            }
        }
    }
    deltas
}

/// Compute the tie-broken standings for the given players.
///
/// Buchholz sums the current score of every opponent faced in a completed
/// match; a rematched opponent counts once per match. Ordering is descending
/// (score, buchholz, rating) with each field breaking ties in the previous
/// one. Fully tied players keep their input order (the sort is stable, and
/// no further tie-break is defined). Reruns with unchanged inputs produce
/// identical ranks.
///
/// Ineligible (non-approved) players in the input get no row — they are
/// never ranked — but their score still counts toward opponents' Buchholz.
pub fn compute_standings(players: &[Player], matches: &[Match]) -> Vec<Standing> {
    let scores: HashMap<PlayerId, Points> =
        players.iter().map(|p| (p.id, p.score)).collect();

    let mut standings: Vec<Standing> = players
        .iter()
        .filter(|p| p.is_eligible())
        .map(|p| Standing {
            player_id: p.id,
            rank: 0,
            score: p.score,
            buchholz: buchholz(p.id, matches, &scores),
            rating: p.rating,
        })
        .collect();

    standings.sort_by(|a, b| {
        (b.score, b.buchholz, b.rating).cmp(&(a.score, a.buchholz, a.rating))
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.rank = (i + 1) as u32;
    }
    standings
}

/// Sum of current scores of all opponents faced in completed matches.
fn buchholz(
    player: PlayerId,
    matches: &[Match],
    scores: &HashMap<PlayerId, Points>,
) -> Points {
    matches
        .iter()
        .filter(|m| m.result.is_some())
        .filter_map(|m| m.opponent_of(player))
        .filter_map(Seat::player)
        .map(|op| scores.get(&op).copied().unwrap_or(Points::ZERO))
        .sum()
}
