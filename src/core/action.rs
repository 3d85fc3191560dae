//! Action representation for the turn state machine.
//!
//! Every move a seat can make is one `Action`. Slot-taking actions carry the
//! hand slot (0..8, top row 0..4, bottom row 4..8).

use serde::{Deserialize, Serialize};

use super::seat::SeatId;

/// A single move through the action API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Reveal one of the two opening cards.
    FlipInitial(usize),
    /// Take the top card of the draw pile.
    Draw,
    /// Take the top card of the discard pile.
    PickUpDiscard,
    /// Throw the held card onto the discard pile.
    DiscardDrawn,
    /// Put the held card into a slot, discarding what was there.
    Replace(usize),
    /// Reveal a face-down slot owed after discarding.
    ResolveFlip(usize),
    /// End the turn without drawing (one face-down card left).
    Pass,
}

impl Action {
    /// The hand slot this action targets, if any.
    #[must_use]
    pub fn slot(self) -> Option<usize> {
        match self {
            Action::FlipInitial(slot) | Action::Replace(slot) | Action::ResolveFlip(slot) => Some(slot),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::FlipInitial(slot) => write!(f, "flip initial {}", slot),
            Action::Draw => write!(f, "draw"),
            Action::PickUpDiscard => write!(f, "pick up discard"),
            Action::DiscardDrawn => write!(f, "discard drawn"),
            Action::Replace(slot) => write!(f, "replace {}", slot),
            Action::ResolveFlip(slot) => write!(f, "flip {}", slot),
            Action::Pass => write!(f, "pass"),
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub seat: SeatId,

    /// The action taken.
    pub action: Action,

    /// Hole number (1-based) when the action was taken.
    pub hole: u8,

    /// Sequence number within the hole.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(seat: SeatId, action: Action, hole: u8, sequence: u32) -> Self {
        Self {
            seat,
            action,
            hole,
            sequence,
        }
    }
}
