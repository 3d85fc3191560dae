//! Card system: cards, hands, and the deck.
//!
//! ## Key Types
//!
//! - `Card`: a value (-5 or 0..=12) with a face-up flag
//! - `Hand`: eight cards in a 2 × 4 grid, scored by column
//! - `deck`: building, dealing and seeding the discard pile

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, CardId, MAX_VALUE, PENALTY_VALUE};
pub use deck::{build_deck, copies_of, deal, deck_values, seed_discard, unshuffled_deck, DECK_SIZE};
pub use hand::{column_of, partner_of, Hand, COLUMNS, HAND_SIZE};
