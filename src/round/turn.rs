//! The turn state machine: the action API and its legality checks.
//!
//! ```text
//! INITIAL_FLIP → ACTIVE → TURN_COMPLETE → (rotation) → next seat
//! ```
//!
//! Every operation returns `true` when it changed the state and `false`
//! (leaving the state untouched) when its preconditions do not hold. After a
//! successful mutation `settle` runs the final-turn coordinator and seat
//! rotation.

use super::state::RoundState;
use crate::cards::HAND_SIZE;
use crate::core::{Action, SeatId};

/// Face-up cards a seat reveals before its first draw.
pub const INITIAL_FLIPS: usize = 2;

impl RoundState {
    // === Legality ===

    /// Can `seat` flip `slot` as one of its opening cards?
    #[must_use]
    pub fn can_flip_initial(&self, seat: SeatId, slot: usize) -> bool {
        let (Some(flags), Some(hand)) = (self.flags(seat), self.hand(seat)) else {
            return false;
        };
        !self.round_over
            && !flags.initial_flips_done
            && hand.flipped_count() < INITIAL_FLIPS
            && self.drawn_card.is_none()
            && hand.is_face_down(slot)
    }

    /// Can the current seat draw from the draw pile?
    #[must_use]
    pub fn can_draw(&self) -> bool {
        let flags = &self.flags[self.current];
        !self.round_over
            && flags.initial_flips_done
            && self.drawn_card.is_none()
            && !flags.has_drawn_this_turn
            && !flags.turn_complete
            && !self.draw_pile.is_empty()
    }

    /// Can the current seat take the top discard?
    ///
    /// Needs no held card and an unfinished turn, so a seat may take back a
    /// card it has just discarded.
    #[must_use]
    pub fn can_pick_up_discard(&self) -> bool {
        !self.round_over
            && self.drawn_card.is_none()
            && !self.flags[self.current].turn_complete
            && !self.discard_pile.is_empty()
    }

    /// Can the current seat discard the card it holds?
    #[must_use]
    pub fn can_discard_drawn(&self) -> bool {
        !self.round_over && self.drawn_card.is_some() && !self.flags[self.current].turn_complete
    }

    /// Can the current seat put its held card into `slot`?
    #[must_use]
    pub fn can_replace(&self, slot: usize) -> bool {
        self.can_discard_drawn() && slot < HAND_SIZE
    }

    /// Can the current seat pay its owed flip with `slot`?
    #[must_use]
    pub fn can_resolve_flip(&self, slot: usize) -> bool {
        let flags = &self.flags[self.current];
        !self.round_over
            && flags.must_flip_after_discard
            && !flags.turn_complete
            && self.drawn_card.is_none()
            && self.seats[self.current].hand.is_face_down(slot)
    }

    /// Can the current seat end its turn without drawing?
    #[must_use]
    pub fn can_pass(&self) -> bool {
        let flags = &self.flags[self.current];
        !self.round_over
            && self.allow_pass
            && flags.initial_flips_done
            && !flags.has_drawn_this_turn
            && !flags.turn_complete
            && self.drawn_card.is_none()
            && self.seats[self.current].hand.face_down_count() == 1
    }

    /// Is `action` legal for `seat` right now?
    ///
    /// Only the current seat may act, except for opening flips.
    #[must_use]
    pub fn is_legal(&self, seat: SeatId, action: Action) -> bool {
        if let Action::FlipInitial(slot) = action {
            return self.can_flip_initial(seat, slot);
        }
        if seat != self.current {
            return false;
        }
        match action {
            Action::FlipInitial(_) => false,
            Action::Draw => self.can_draw(),
            Action::PickUpDiscard => self.can_pick_up_discard(),
            Action::DiscardDrawn => self.can_discard_drawn(),
            Action::Replace(slot) => self.can_replace(slot),
            Action::ResolveFlip(slot) => self.can_resolve_flip(slot),
            Action::Pass => self.can_pass(),
        }
    }

    /// Every legal action for `seat`.
    #[must_use]
    pub fn legal_actions(&self, seat: SeatId) -> Vec<Action> {
        let mut actions: Vec<Action> = (0..HAND_SIZE)
            .flat_map(|slot| [Action::FlipInitial(slot), Action::Replace(slot), Action::ResolveFlip(slot)])
            .collect();
        actions.extend([Action::Draw, Action::PickUpDiscard, Action::DiscardDrawn, Action::Pass]);
        actions.retain(|&action| self.is_legal(seat, action));
        actions
    }

    /// May the UI let `seat` click the card in `slot`?
    #[must_use]
    pub fn can_interact_with_card(&self, seat: SeatId, slot: usize) -> bool {
        self.is_legal(seat, Action::FlipInitial(slot))
            || self.is_legal(seat, Action::Replace(slot))
            || self.is_legal(seat, Action::ResolveFlip(slot))
    }

    // === Actions ===

    /// Apply `action` for `seat`. Illegal actions are no-ops.
    pub fn apply(&mut self, seat: SeatId, action: Action) -> bool {
        if !self.is_legal(seat, action) {
            return false;
        }
        match action {
            Action::FlipInitial(slot) => self.flip_initial_card(seat, slot),
            Action::Draw => self.draw(),
            Action::PickUpDiscard => self.pick_up_discard(),
            Action::DiscardDrawn => self.discard_drawn(),
            Action::Replace(slot) => self.replace(slot),
            Action::ResolveFlip(slot) => self.resolve_mandatory_flip(slot),
            Action::Pass => self.pass_turn(),
        }
    }

    /// Flip one of `seat`'s two opening cards.
    pub fn flip_initial_card(&mut self, seat: SeatId, slot: usize) -> bool {
        if !self.can_flip_initial(seat, slot) {
            return false;
        }
        let hand = &mut self.seats[seat].hand;
        hand.flip(slot);
        if hand.flipped_count() >= INITIAL_FLIPS {
            self.flags[seat].initial_flips_done = true;
        }
        self.settle();
        true
    }

    /// Take the top card of the draw pile into the drawn-card slot.
    pub fn draw(&mut self) -> bool {
        if !self.can_draw() {
            return false;
        }
        let Some(card) = self.draw_pile.pop_front() else {
            return false;
        };
        self.drawn_card = Some(card);
        self.flags[self.current].has_drawn_this_turn = true;
        self.settle();
        true
    }

    /// Take the top discard, face up, into the drawn-card slot. Any flip owed
    /// from an earlier discard is cancelled.
    pub fn pick_up_discard(&mut self) -> bool {
        if !self.can_pick_up_discard() {
            return false;
        }
        let Some(card) = self.discard_pile.pop() else {
            return false;
        };
        self.drawn_card = Some(card.revealed());
        self.flags[self.current].must_flip_after_discard = false;
        self.settle();
        true
    }

    /// Throw the held card onto the discard pile.
    ///
    /// With one face-down card left the turn ends at once; otherwise the seat
    /// owes a flip.
    pub fn discard_drawn(&mut self) -> bool {
        if !self.can_discard_drawn() {
            return false;
        }
        let Some(card) = self.drawn_card.take() else {
            return false;
        };
        self.discard_pile.push(card.revealed());

        let last_card = self.seats[self.current].hand.face_down_count() == 1;
        let flags = &mut self.flags[self.current];
        if last_card {
            flags.turn_complete = true;
        } else {
            flags.must_flip_after_discard = true;
        }
        self.settle();
        true
    }

    /// Put the held card into `slot`; the displaced card is discarded face up.
    /// Always ends the turn.
    pub fn replace(&mut self, slot: usize) -> bool {
        if !self.can_replace(slot) {
            return false;
        }
        let Some(card) = self.drawn_card.take() else {
            return false;
        };
        let Some(displaced) = self.seats[self.current].hand.replace(slot, card) else {
            self.drawn_card = Some(card);
            return false;
        };
        self.discard_pile.push(displaced);

        let flags = &mut self.flags[self.current];
        flags.must_flip_after_discard = false;
        flags.turn_complete = true;
        self.settle();
        true
    }

    /// Pay the flip owed after a discard. Ends the turn.
    pub fn resolve_mandatory_flip(&mut self, slot: usize) -> bool {
        if !self.can_resolve_flip(slot) {
            return false;
        }
        self.seats[self.current].hand.flip(slot);
        let flags = &mut self.flags[self.current];
        flags.must_flip_after_discard = false;
        flags.turn_complete = true;
        self.settle();
        true
    }

    /// End the turn without drawing.
    pub fn pass_turn(&mut self) -> bool {
        if !self.can_pass() {
            return false;
        }
        self.flags[self.current].turn_complete = true;
        self.settle();
        true
    }

    // === Post-transition hook ===

    /// Run the final-turn coordinator, then rotate seats if the turn is over.
    pub(crate) fn settle(&mut self) {
        if self.round_over {
            return;
        }
        let seat = self.current;

        if !self.revealed[seat] && self.seats[seat].hand.is_fully_revealed() {
            self.revealed[seat] = true;
            self.on_full_reveal(seat);
            if self.round_over || self.current != seat {
                return;
            }
        }

        if !self.flags[seat].turn_complete {
            return;
        }
        if self.final_turn.is_some() {
            self.on_turn_complete_in_final(seat);
        } else {
            self.move_control(seat.next(self.seat_count()));
        }
    }
}
