//! Decision policies for computer seats.
//!
//! A policy looks at the round and returns the next batch of actions for a
//! seat. The driver applies them one by one with a pacing pause in between,
//! then asks again with the fresh state. An empty decision means the seat
//! has nothing to do.

use smallvec::SmallVec;

use crate::core::{Action, GameRng, SeatId};
use crate::round::RoundState;

/// Actions to apply in order. Most decisions are one or two actions.
pub type Decision = SmallVec<[Action; 2]>;

/// Policy for choosing a computer seat's next actions.
pub trait DecisionPolicy: Send + Sync {
    /// Decide the next actions for `seat`.
    fn decide(&self, round: &RoundState, seat: SeatId, rng: &mut GameRng) -> Decision;
}

/// Uniformly random legal play.
///
/// Useful as a baseline opponent and for exercising the engine in tests.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl DecisionPolicy for RandomPolicy {
    fn decide(&self, round: &RoundState, seat: SeatId, rng: &mut GameRng) -> Decision {
        let actions = round.legal_actions(seat);
        rng.choose(&actions).copied().into_iter().collect()
    }
}
