//! Final-turn coordinator.
//!
//! When a seat's hand first becomes fully face up, every other seat that
//! still has a face-down card gets exactly one more turn, in turn order
//! starting after the revealing seat. Then the hole is scored.
//!
//! The sequence state is an owned value inside `RoundState`; it exists only
//! between the first full reveal and finalization.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::state::RoundState;
use crate::core::SeatId;

/// Seats still owed a final turn, in order.
pub type SeatQueue = SmallVec<[SeatId; 6]>;

/// Progress of the final-turn sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalTurnState {
    /// Seat taking (or about to take) its final turn.
    pub final_turn_seat: SeatId,
    /// Control has not yet reached `final_turn_seat`.
    pub pending: bool,
    /// Seats waiting for their final turn after `final_turn_seat`.
    pub queue: SeatQueue,
    /// Seats that already had their final turn.
    pub completed: SeatQueue,
}

impl FinalTurnState {
    fn new(seat: SeatId, queue: SeatQueue) -> Self {
        Self {
            final_turn_seat: seat,
            pending: true,
            queue,
            completed: SeatQueue::new(),
        }
    }

    /// Is `seat` already scheduled or done?
    #[must_use]
    pub fn knows(&self, seat: SeatId) -> bool {
        seat == self.final_turn_seat || self.queue.contains(&seat) || self.completed.contains(&seat)
    }
}

impl RoundState {
    /// Is a final-turn seat designated but not yet in control?
    #[must_use]
    pub fn is_final_turn_pending(&self) -> bool {
        self.final_turn.as_ref().is_some_and(|ft| ft.pending)
    }

    /// Seats after `seat` in turn order that still hold a face-down card.
    fn seats_with_hidden_cards_after(&self, seat: SeatId) -> SeatQueue {
        seat.others_in_turn_order(self.seat_count())
            .filter(|&other| self.seats[other].hand.face_down_count() > 0)
            .collect()
    }

    /// `seat` just turned its last card face up.
    pub(crate) fn on_full_reveal(&mut self, seat: SeatId) {
        let pending = self.seats_with_hidden_cards_after(seat);
        log::info!("{} fully revealed; {} seat(s) owed a final turn", seat, pending.len());

        match self.final_turn.as_mut() {
            None if pending.is_empty() => self.finalize(),
            None => {
                let mut queue = pending;
                let first = queue.remove(0);
                self.final_turn = Some(FinalTurnState::new(first, queue));
                self.start_final_turn(first);
            }
            Some(ft) => {
                for other in pending {
                    if !ft.knows(other) {
                        ft.queue.push(other);
                    }
                }
            }
        }
    }

    /// Give `seat` its final turn.
    fn start_final_turn(&mut self, seat: SeatId) {
        log::info!("final turn for {}", seat);
        if let Some(ft) = self.final_turn.as_mut() {
            ft.final_turn_seat = seat;
            ft.pending = true;
        }
        self.move_control(seat);
    }

    /// Clear `pending` once control sits with the final-turn seat.
    pub(crate) fn note_control_reached(&mut self) {
        let current = self.current;
        if let Some(ft) = self.final_turn.as_mut() {
            if ft.final_turn_seat == current {
                ft.pending = false;
            }
        }
    }

    /// A turn ended while the final-turn sequence holds control.
    pub(crate) fn on_turn_complete_in_final(&mut self, seat: SeatId) {
        let Some(ft) = self.final_turn.as_mut() else {
            return;
        };
        if ft.final_turn_seat != seat {
            let owner = ft.final_turn_seat;
            self.move_control(owner);
            return;
        }
        if ft.pending {
            return;
        }
        ft.completed.push(seat);

        if self.seats[seat].hand.face_down_count() > 0 {
            let hidden = self.seats[seat].hand.reveal_all();
            self.revealed[seat] = true;
            log::debug!("{} force-revealed {} card(s) after final turn", seat, hidden);
        }

        loop {
            let Some(ft) = self.final_turn.as_mut() else {
                return;
            };
            if ft.queue.is_empty() {
                break;
            }
            let next = ft.queue.remove(0);
            if ft.completed.contains(&next) || self.seats[next].hand.face_down_count() == 0 {
                continue;
            }
            self.start_final_turn(next);
            return;
        }
        self.finalize();
    }
}
