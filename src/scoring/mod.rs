//! Scoring engine: pure functions over a hand.
//!
//! - `visible_score`: running score from face-up cards only
//! - `final_score`: score of a fully revealed hand, with bonuses
//! - `explain_score`: the same calculation, itemized per column

pub mod breakdown;

pub use breakdown::{
    bonus_for_group, explain_score, final_score, visible_score, ColumnScore, ScoreBreakdown,
    FOUR_PENALTY_BONUS,
};
