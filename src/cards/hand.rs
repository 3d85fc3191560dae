//! An 8-card Golf hand laid out as 2 rows × 4 columns.
//!
//! ```text
//!   slot:  0  1  2  3     (top row)
//!          4  5  6  7     (bottom row)
//! ```
//!
//! Column `c` is slots `c` and `c + 4`. The face-up count is tracked
//! incrementally; `recount_flipped` recomputes it from the cards.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Cards in a hand.
pub const HAND_SIZE: usize = 8;

/// Columns in a hand.
pub const COLUMNS: usize = 4;

/// Column index of a slot.
#[must_use]
pub const fn column_of(slot: usize) -> usize {
    slot % COLUMNS
}

/// The other slot in the same column.
#[must_use]
pub const fn partner_of(slot: usize) -> usize {
    if slot < COLUMNS {
        slot + COLUMNS
    } else {
        slot - COLUMNS
    }
}

/// A seat's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
    flipped: u8,
}

impl Hand {
    /// Create a hand from exactly eight cards, keeping their face state.
    #[must_use]
    pub fn new(cards: [Card; HAND_SIZE]) -> Self {
        let flipped = cards.iter().filter(|c| c.face_up).count() as u8;
        Self { cards, flipped }
    }

    /// All cards in slot order.
    #[must_use]
    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// The card in a slot.
    #[must_use]
    pub fn card(&self, slot: usize) -> Option<&Card> {
        self.cards.get(slot)
    }

    /// Top and bottom card of a column.
    #[must_use]
    pub fn column(&self, column: usize) -> (&Card, &Card) {
        (&self.cards[column], &self.cards[column + COLUMNS])
    }

    /// Number of face-up cards (incrementally tracked).
    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.flipped as usize
    }

    /// Number of face-down cards.
    #[must_use]
    pub fn face_down_count(&self) -> usize {
        HAND_SIZE - self.flipped_count()
    }

    /// True when every card is face up.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.flipped_count() == HAND_SIZE
    }

    /// Is the card in `slot` face down? Out-of-range slots are not.
    #[must_use]
    pub fn is_face_down(&self, slot: usize) -> bool {
        self.cards.get(slot).is_some_and(|c| !c.face_up)
    }

    /// Slots holding face-down cards, in slot order.
    pub fn face_down_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HAND_SIZE).filter(move |&slot| !self.cards[slot].face_up)
    }

    /// Slots holding face-up cards, in slot order.
    pub fn face_up_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HAND_SIZE).filter(move |&slot| self.cards[slot].face_up)
    }

    /// Both cards of the column are face up with the same value.
    #[must_use]
    pub fn is_column_matched(&self, column: usize) -> bool {
        let (top, bottom) = self.column(column);
        top.face_up && bottom.face_up && top.value == bottom.value
    }

    /// A matched column of an ordinary value, which scores zero.
    #[must_use]
    pub fn is_column_canceled(&self, column: usize) -> bool {
        self.is_column_matched(column) && !self.cards[column].is_penalty()
    }

    /// Turn a face-down card up. Returns false if it already was.
    pub fn flip(&mut self, slot: usize) -> bool {
        match self.cards.get_mut(slot) {
            Some(card) if !card.face_up => {
                card.face_up = true;
                self.flipped += 1;
                true
            }
            _ => false,
        }
    }

    /// Put `card` face up into `slot`, returning the displaced card face up.
    pub fn replace(&mut self, slot: usize, card: Card) -> Option<Card> {
        let existing = self.cards.get_mut(slot)?;
        let displaced = std::mem::replace(existing, card.revealed());
        if !displaced.face_up {
            self.flipped += 1;
        }
        Some(displaced.revealed())
    }

    /// Turn every card face up. Returns how many were face down.
    pub fn reveal_all(&mut self) -> usize {
        let hidden = self.face_down_count();
        for card in &mut self.cards {
            card.face_up = true;
        }
        self.flipped = HAND_SIZE as u8;
        hidden
    }

    /// Recompute the face-up count from the cards.
    #[must_use]
    pub fn recount_flipped(&self) -> usize {
        self.cards.iter().filter(|c| c.face_up).count()
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = Vec<Card>;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let cards: [Card; HAND_SIZE] = cards.try_into()?;
        Ok(Self::new(cards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn hand(values: [i8; HAND_SIZE]) -> Hand {
        let cards = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Card::new(CardId::new(i as u8), v))
            .collect::<Vec<_>>();
        Hand::try_from(cards).unwrap()
    }

    #[test]
    fn test_columns_and_partners() {
        assert_eq!(column_of(6), 2);
        assert_eq!(partner_of(1), 5);
        assert_eq!(partner_of(7), 3);
    }

    #[test]
    fn test_flip_counts_once() {
        let mut h = hand([1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(h.flip(2));
        assert!(!h.flip(2));
        assert!(!h.flip(8));
        assert_eq!(h.flipped_count(), 1);
        assert_eq!(h.face_down_slots().count(), 7);
    }

    #[test]
    fn test_replace_face_down_slot_counts_as_flip() {
        let mut h = hand([1, 2, 3, 4, 5, 6, 7, 8]);
        let displaced = h.replace(0, Card::new(CardId::new(50), 0)).unwrap();
        assert_eq!(displaced.value, 1);
        assert!(displaced.face_up);
        assert_eq!(h.flipped_count(), 1);
        assert!(h.card(0).unwrap().face_up);

        h.replace(0, Card::new(CardId::new(51), 3));
        assert_eq!(h.flipped_count(), 1);
        assert_eq!(h.flipped_count(), h.recount_flipped());
    }

    #[test]
    fn test_column_match_and_cancel() {
        let mut h = hand([4, -5, 0, 0, 4, -5, 1, 0]);
        h.reveal_all();
        assert!(h.is_column_canceled(0));
        assert!(h.is_column_matched(1));
        assert!(!h.is_column_canceled(1));
        assert!(!h.is_column_matched(2));
        assert!(h.is_fully_revealed());
    }

    #[test]
    fn test_try_from_wrong_size() {
        assert!(Hand::try_from(vec![Card::new(CardId::new(0), 1)]).is_err());
    }
}
