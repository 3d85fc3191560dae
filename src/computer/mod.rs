//! Computer players.
//!
//! - `DecisionPolicy`: how a computer seat picks its next actions
//! - `HeuristicPolicy`: the priority-ladder player
//! - `RandomPolicy`: uniformly random legal play
//! - `Pacer`: cosmetic delay between steps

pub mod policy;
pub mod heuristic;
pub mod pacing;

pub use policy::{Decision, DecisionPolicy, RandomPolicy};
pub use heuristic::{expected_unknown_value, HeuristicPolicy, SKIP_SUM_THRESHOLD};
pub use pacing::{NoPacing, Pacer, RecordingPacer, SleepPacing};
