//! Round-robin scheduling via the circle method.

use crate::logic::swiss::{Pairing, PairingSet};
use crate::models::{PlayerId, Seat};
use rand::Rng;

/// A complete fixture list: one PairingSet per round.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundRobinSchedule {
    pub rounds: Vec<PairingSet>,
    pub total_rounds: u32,
}

impl RoundRobinSchedule {
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Generate the full round-robin schedule in one call.
///
/// Circle method: an odd pool gets a virtual bye slot to become even, the
/// first position stays fixed, and the rest rotate by one each round for
/// `n - 1` rounds (n = padded count). Round `r` pairs position `i` with
/// position `n-1-i`. Whoever lands opposite the bye slot sits out that round
/// with a half-point bye. Colors are a coin flip per pairing, independent of
/// rotation parity.
///
/// `total_rounds` is authoritative: it replaces any configured Swiss round
/// count, since the whole schedule exists up front.
pub fn generate_round_robin_schedule(
    players: &[PlayerId],
    rng: &mut impl Rng,
) -> RoundRobinSchedule {
    if players.len() < 2 {
        return RoundRobinSchedule::default();
    }

    let mut rotation: Vec<Seat> = players.iter().copied().map(Seat::Player).collect();
    if rotation.len() % 2 != 0 {
        rotation.push(Seat::Bye);
    }
    let n = rotation.len();
    let total_rounds = n - 1;

    let mut rounds = Vec::with_capacity(total_rounds);
    for _ in 0..total_rounds {
        let mut set = PairingSet::default();
        for i in 0..n / 2 {
            match (rotation[i], rotation[n - 1 - i]) {
                (Seat::Player(a), Seat::Player(b)) => {
                    let (white, black) = if rng.gen::<bool>() { (a, b) } else { (b, a) };
                    set.pairings.push(Pairing { white, black });
                }
                (Seat::Player(a), Seat::Bye) | (Seat::Bye, Seat::Player(a)) => {
                    set.bye = Some(a);
                }
                (Seat::Bye, Seat::Bye) => {}
            }
        }
        rounds.push(set);

        // Rotate everything except position 0: last element moves to front.
        let last = rotation.pop().expect("rotation is non-empty");
        rotation.insert(1, last);
    }

    RoundRobinSchedule {
        rounds,
        total_rounds: total_rounds as u32,
    }
}
