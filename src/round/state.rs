//! Round state: hands, piles, the drawn-card slot and per-seat flags.
//!
//! One `RoundState` lives for exactly one hole. It owns every card of the
//! deck at all times:
//!
//! ```text
//! draw pile + discard pile + drawn card + Σ hands == 108
//! ```
//!
//! Mutation happens only through the action API in `turn.rs`; the final-turn
//! coordinator in `final_turn.rs` runs as a post-transition hook.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::final_turn::FinalTurnState;
use crate::cards::{build_deck, deal, seed_discard, Card, Hand};
use crate::core::{GameRng, SeatConfig, SeatId, SeatMap};
use crate::scoring::{explain_score, visible_score, ScoreBreakdown};

/// A seat at the table and the hand it holds this hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub hand: Hand,
    pub is_computer: bool,
    pub display_name: String,
    pub color: String,
}

/// Turn bookkeeping for one seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatFlags {
    /// Both opening cards have been flipped.
    pub initial_flips_done: bool,
    /// A card was drawn from the draw pile this turn.
    pub has_drawn_this_turn: bool,
    /// The seat's turn is over.
    pub turn_complete: bool,
    /// The seat discarded and now owes a flip.
    pub must_flip_after_discard: bool,
}

impl SeatFlags {
    /// Clear per-turn flags when the seat takes control.
    pub fn reset_turn(&mut self) {
        self.turn_complete = false;
        self.has_drawn_this_turn = false;
        self.must_flip_after_discard = false;
    }
}

/// Where a seat is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatPhase {
    /// Opening cards not yet flipped.
    InitialFlip,
    /// Free to act.
    Active,
    /// Turn finished, waiting for rotation.
    TurnComplete,
}

/// Complete state of one hole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub(crate) seats: SeatMap<Seat>,
    pub(crate) flags: SeatMap<SeatFlags>,
    pub(crate) current: SeatId,
    pub(crate) drawn_card: Option<Card>,
    /// Top = last.
    pub(crate) discard_pile: Vec<Card>,
    /// Top = front.
    pub(crate) draw_pile: VecDeque<Card>,
    pub(crate) final_turn: Option<FinalTurnState>,
    /// Seats whose hand has already been seen fully revealed this hole.
    pub(crate) revealed: SeatMap<bool>,
    pub(crate) round_over: bool,
    pub(crate) results: Option<SeatMap<ScoreBreakdown>>,
    /// Seats may pass with one face-down card left.
    pub(crate) allow_pass: bool,
}

impl RoundState {
    /// Shuffle a fresh deck, deal every seat and seed the discard pile.
    ///
    /// Seat 0 starts. Returns `None` if the seats cannot be dealt.
    #[must_use]
    pub fn deal(seats: &[SeatConfig], allow_pass: bool, rng: &mut GameRng) -> Option<Self> {
        if seats.is_empty() {
            return None;
        }
        let (hands, mut draw_pile) = deal(build_deck(rng), seats.len())?;
        let discard_pile = seed_discard(&mut draw_pile);

        let seats: Vec<Seat> = seats
            .iter()
            .zip(hands)
            .map(|(config, hand)| Seat {
                hand,
                is_computer: config.is_computer,
                display_name: config.name.clone(),
                color: config.color.clone(),
            })
            .collect();
        let count = seats.len();

        Some(Self {
            seats: SeatMap::from_vec(seats),
            flags: SeatMap::with_default(count),
            current: SeatId::new(0),
            drawn_card: None,
            discard_pile,
            draw_pile,
            final_turn: None,
            revealed: SeatMap::with_value(count, false),
            round_over: false,
            results: None,
            allow_pass,
        })
    }

    // === Seats ===

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.seat_count()
    }

    /// Iterate over all seat IDs.
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> {
        SeatId::all(self.seat_count())
    }

    /// A seat, or `None` for an unknown seat.
    #[must_use]
    pub fn seat(&self, seat: SeatId) -> Option<&Seat> {
        self.seats.get(seat)
    }

    /// All seats in turn order.
    #[must_use]
    pub fn seats(&self) -> &SeatMap<Seat> {
        &self.seats
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, seat: SeatId) -> Option<&Hand> {
        self.seats.get(seat).map(|s| &s.hand)
    }

    /// A seat's turn flags.
    #[must_use]
    pub fn flags(&self, seat: SeatId) -> Option<&SeatFlags> {
        self.flags.get(seat)
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn current_seat(&self) -> SeatId {
        self.current
    }

    /// Where a seat is in its turn cycle.
    #[must_use]
    pub fn phase(&self, seat: SeatId) -> Option<SeatPhase> {
        let flags = self.flags.get(seat)?;
        Some(if !flags.initial_flips_done {
            SeatPhase::InitialFlip
        } else if flags.turn_complete {
            SeatPhase::TurnComplete
        } else {
            SeatPhase::Active
        })
    }

    /// Is the current seat played by the computer?
    #[must_use]
    pub fn current_is_computer(&self) -> bool {
        self.seats.get(self.current).is_some_and(|s| s.is_computer)
    }

    // === Piles ===

    /// The card held by the current seat, if any.
    #[must_use]
    pub fn drawn_card(&self) -> Option<&Card> {
        self.drawn_card.as_ref()
    }

    /// Top of the discard pile.
    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// The whole discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Cards left to draw.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Every card currently on the table, in no particular order.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.drawn_card.iter())
            .chain(self.seats.values().flat_map(|s| s.hand.cards().iter()))
    }

    /// Total cards across all zones. Always 108 for a dealt round.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + usize::from(self.drawn_card.is_some())
            + self.seats.values().map(|s| s.hand.cards().len()).sum::<usize>()
    }

    // === Progress ===

    /// The hole has been scored.
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    /// Itemized scores once the hole is over.
    #[must_use]
    pub fn results(&self) -> Option<&SeatMap<ScoreBreakdown>> {
        self.results.as_ref()
    }

    /// The final-turn sequence, while one is running.
    #[must_use]
    pub fn final_turn(&self) -> Option<&FinalTurnState> {
        self.final_turn.as_ref()
    }

    /// The seat currently taking its final turn.
    #[must_use]
    pub fn final_turn_seat(&self) -> Option<SeatId> {
        self.final_turn.as_ref().map(|ft| ft.final_turn_seat)
    }

    /// Running score from a seat's face-up cards.
    #[must_use]
    pub fn visible_score(&self, seat: SeatId) -> Option<i32> {
        self.hand(seat).map(visible_score)
    }

    /// Final score with bonuses, available once a seat's hand is fully revealed.
    #[must_use]
    pub fn final_score_with_bonus(&self, seat: SeatId) -> Option<i32> {
        self.hand(seat)
            .filter(|h| h.is_fully_revealed())
            .map(|h| explain_score(h).total)
    }

    /// Passing with one face-down card is enabled for this round.
    #[must_use]
    pub fn allows_pass(&self) -> bool {
        self.allow_pass
    }

    // === Control ===

    /// Hand control to `seat` with a fresh turn.
    pub(crate) fn move_control(&mut self, seat: SeatId) {
        self.current = seat;
        if let Some(flags) = self.flags.get_mut(seat) {
            flags.reset_turn();
        }
        log::debug!("control passes to {}", seat);
        self.note_control_reached();
    }

    /// Reveal every hand, score it, and close the round.
    pub(crate) fn finalize(&mut self) {
        for seat in self.seats.values_mut() {
            seat.hand.reveal_all();
        }
        for revealed in self.revealed.values_mut() {
            *revealed = true;
        }
        let results = SeatMap::from_vec(self.seats.values().map(|s| explain_score(&s.hand)).collect());
        log::info!(
            "hole finalized: scores {:?}",
            results.values().map(|b| b.total).collect::<Vec<_>>()
        );
        self.results = Some(results);
        self.final_turn = None;
        self.round_over = true;
    }
}
