//! Round engine: one hole of play.
//!
//! - `state`: seats, hands, piles, drawn-card slot, per-seat flags
//! - `turn`: the action API and its legality checks
//! - `final_turn`: the one-more-turn sequence after a full reveal

pub mod state;
pub mod turn;
pub mod final_turn;

pub use state::{RoundState, Seat, SeatFlags, SeatPhase};
pub use turn::INITIAL_FLIPS;
pub use final_turn::{FinalTurnState, SeatQueue};
