//! Deck building, dealing and seeding the discard pile.
//!
//! A Golf deck has 108 cards: eight copies of each value 0..=12 and four
//! -5 penalty cards. A fresh deck is built and shuffled for every hole.

use std::collections::VecDeque;

use super::card::{Card, CardId, MAX_VALUE, PENALTY_VALUE};
use super::hand::{Hand, HAND_SIZE};
use crate::core::GameRng;

/// Total cards in a deck.
pub const DECK_SIZE: usize = 108;

/// Copies of each ordinary value.
pub const COPIES_PER_VALUE: usize = 8;

/// Copies of the penalty card.
pub const PENALTY_COPIES: usize = 4;

/// How many copies of `value` a full deck holds.
#[must_use]
pub const fn copies_of(value: i8) -> usize {
    if value == PENALTY_VALUE {
        PENALTY_COPIES
    } else if value >= 0 && value <= MAX_VALUE {
        COPIES_PER_VALUE
    } else {
        0
    }
}

/// Every distinct value in the deck, penalty first.
pub fn deck_values() -> impl Iterator<Item = i8> {
    std::iter::once(PENALTY_VALUE).chain(0..=MAX_VALUE)
}

/// Build the 108 cards in a fixed order, all face down.
#[must_use]
pub fn unshuffled_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for value in deck_values() {
        for _ in 0..copies_of(value) {
            cards.push(Card::new(CardId::new(cards.len() as u8), value));
        }
    }
    cards
}

/// Build a uniformly shuffled deck, all face down.
#[must_use]
pub fn build_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut cards = unshuffled_deck();
    rng.shuffle(&mut cards);
    cards
}

/// Deal eight cards to each seat in seat order from the front of `deck`.
///
/// Returns the hands and the remaining draw pile (front = top), or `None` when
/// the deck cannot cover every seat.
#[must_use]
pub fn deal(deck: Vec<Card>, seat_count: usize) -> Option<(Vec<Hand>, VecDeque<Card>)> {
    if seat_count * HAND_SIZE > deck.len() {
        return None;
    }

    let mut pile: VecDeque<Card> = deck.into();
    let mut hands = Vec::with_capacity(seat_count);
    for _ in 0..seat_count {
        let cards: Vec<Card> = pile.drain(..HAND_SIZE).collect();
        hands.push(Hand::try_from(cards).ok()?);
    }
    Some((hands, pile))
}

/// Move the top draw-pile card face up onto a new discard pile.
///
/// Returns the discard pile (top = last), empty if the draw pile was empty.
pub fn seed_discard(draw_pile: &mut VecDeque<Card>) -> Vec<Card> {
    draw_pile
        .pop_front()
        .map(|card| vec![card.revealed()])
        .unwrap_or_default()
}
