//! Swiss pairing: match players of similar standing, avoiding rematches.

use crate::models::{Match, Player, PlayerId, Seat};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A proposed game: who has white, who has black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub white: PlayerId,
    pub black: PlayerId,
}

/// Pairings for one round, plus the bye recipient if the pool was odd.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PairingSet {
    pub pairings: Vec<Pairing>,
    pub bye: Option<PlayerId>,
}

impl PairingSet {
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty() && self.bye.is_none()
    }
}

/// Generate Swiss pairings for one round.
///
/// `players` must contain only approved players, sorted descending by
/// (score, rating); that ordering is the seeding, so neighbours in the list
/// have similar standings.
///
/// 1. On the first round there is no score signal yet, so the pool is
///    shuffled instead of seeded.
/// 2. An odd pool drops its tail player as the bye recipient. The caller
///    awards the half point; this function stays pure.
/// 3. Each unpaired player is matched with the nearest unpaired player they
///    have never faced (either color, full history). If every remaining
///    candidate is a rematch, the nearest unpaired player is taken anyway
///    rather than leaving anyone unpaired.
/// 4. Colors are a coin flip per pairing.
///
/// Fewer than 2 players yields an empty set; callers branch on emptiness.
pub fn generate_swiss_pairings(
    players: &[Player],
    past_matches: &[Match],
    first_round: bool,
    rng: &mut impl Rng,
) -> PairingSet {
    if players.len() < 2 {
        return PairingSet::default();
    }

    let mut pool: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    if first_round {
        pool.shuffle(rng);
    }

    let bye = if pool.len() % 2 != 0 { pool.pop() } else { None };

    let played: HashSet<(PlayerId, PlayerId)> = past_matches
        .iter()
        .filter_map(|m| match (m.white, m.black) {
            (Seat::Player(a), Seat::Player(b)) => Some(ordered(a, b)),
            _ => None,
        })
        .collect();

    let mut used = vec![false; pool.len()];
    let mut pairings = Vec::with_capacity(pool.len() / 2);

    for i in 0..pool.len() {
        if used[i] {
            continue;
        }
        let fresh = (i + 1..pool.len())
            .find(|&j| !used[j] && !played.contains(&ordered(pool[i], pool[j])));
        // Forced fallback: rematch beats leaving a player unpaired.
        let partner = fresh.or_else(|| (i + 1..pool.len()).find(|&j| !used[j]));
        if let Some(j) = partner {
            used[i] = true;
            used[j] = true;
            let (white, black) = if rng.gen::<bool>() {
                (pool[i], pool[j])
            } else {
                (pool[j], pool[i])
            };
            pairings.push(Pairing { white, black });
        }
    }

    PairingSet { pairings, bye }
}

fn ordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
