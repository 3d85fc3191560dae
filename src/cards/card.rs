//! A single Golf card.
//!
//! Cards are value-only: there are no suits. Values run 0..=12 plus the
//! -5 penalty card. Only `face_up` changes during play.

use serde::{Deserialize, Serialize};

/// Value of the penalty card.
pub const PENALTY_VALUE: i8 = -5;

/// Highest ordinary card value.
pub const MAX_VALUE: i8 = 12;

/// Unique identifier of a physical card within one deck (0..108).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: i8,
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, value: i8) -> Self {
        Self {
            id,
            value,
            face_up: false,
        }
    }

    /// This card, turned face up.
    #[must_use]
    pub const fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Is this the -5 penalty card?
    #[must_use]
    pub const fn is_penalty(&self) -> bool {
        self.value == PENALTY_VALUE
    }

    /// Is `value` a value that exists in the deck?
    #[must_use]
    pub const fn is_valid_value(value: i8) -> bool {
        value == PENALTY_VALUE || (value >= 0 && value <= MAX_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(3), 7);
        assert!(!card.face_up);
        assert!(card.revealed().face_up);
        assert_eq!(card.revealed().value, 7);
    }

    #[test]
    fn test_valid_values() {
        assert!(Card::is_valid_value(-5));
        assert!(Card::is_valid_value(0));
        assert!(Card::is_valid_value(12));
        assert!(!Card::is_valid_value(-1));
        assert!(!Card::is_valid_value(13));
    }
}
