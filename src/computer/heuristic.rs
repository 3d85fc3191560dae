//! Heuristic computer player.
//!
//! Walks a fixed priority ladder every time it is asked:
//!
//! 1. Flip opening cards at random.
//! 2. Pass with one card left if the layout is already good (when allowed).
//! 3. Take the top discard if it pairs, improves, or is a cheap placeholder.
//! 4. Draw.
//! 5. With one face-down card left, settle the last column.
//! 6. Place or discard the drawn card.
//! 7. Pay an owed flip, preferring columns with a known partner.
//! 8. Draw if nothing else applies.
//!
//! Decisions depend only on the round and the RNG (used for opening flips).

use rustc_hash::FxHashMap;

use super::policy::{Decision, DecisionPolicy};
use crate::cards::{copies_of, deck_values, partner_of, Card, Hand, COLUMNS, HAND_SIZE};
use crate::core::{Action, GameRng, SeatId};
use crate::round::{RoundState, INITIAL_FLIPS};

/// Largest exposed non-cancelled sum at which passing is considered good.
/// Tuned by play, not derived from the scoring rules.
pub const SKIP_SUM_THRESHOLD: i32 = 18;

/// Drawn cards above this are never kept unless they pair.
pub const HIGH_CARD: i8 = 9;

/// Discards at or below this are taken as placeholders for hidden slots.
pub const LOW_DISCARD: i8 = 3;

/// How far below the expected unknown value a card must be to replace a
/// hidden slot on purpose.
pub const EXPECTED_VALUE_MARGIN: f64 = 1.5;

/// The priority-ladder computer player.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy;

impl DecisionPolicy for HeuristicPolicy {
    fn decide(&self, round: &RoundState, seat: SeatId, rng: &mut GameRng) -> Decision {
        let (Some(flags), Some(hand)) = (round.flags(seat), round.hand(seat)) else {
            return Decision::new();
        };
        if round.is_round_over() {
            return Decision::new();
        }

        // 1. Opening flips may be made out of turn.
        if !flags.initial_flips_done {
            return opening_flips(hand, rng);
        }
        if round.current_seat() != seat {
            return Decision::new();
        }

        let drawn = round.drawn_card().copied();
        // Nothing taken or thrown away yet this turn.
        let fresh = drawn.is_none() && !flags.has_drawn_this_turn && !flags.must_flip_after_discard;

        // 2.
        if round.can_pass() && is_good_layout(hand) {
            return Decision::from_slice(&[Action::Pass]);
        }

        // 3. Never take back a card this seat just threw away.
        if fresh && round.can_pick_up_discard() {
            if let Some(slot) = round.discard_top().and_then(|top| discard_target(hand, top.value)) {
                return Decision::from_slice(&[Action::PickUpDiscard, Action::Replace(slot)]);
            }
        }

        // 4.
        if fresh {
            if round.can_draw() {
                return Decision::from_slice(&[Action::Draw]);
            }
            if round.can_pick_up_discard() {
                return Decision::from_slice(&[Action::PickUpDiscard]);
            }
        }

        if let Some(card) = drawn {
            // 5.
            if hand.face_down_count() == 1 {
                return Decision::from_slice(&[last_card_choice(hand, card)]);
            }
            // 6.
            let unknown = expected_unknown_value(round, seat);
            return Decision::from_slice(&[placement(hand, card, unknown)]);
        }

        // 7.
        if flags.must_flip_after_discard {
            if let Some(slot) = flip_target(hand) {
                return Decision::from_slice(&[Action::ResolveFlip(slot)]);
            }
        }

        // 8.
        if fresh && round.can_draw() {
            return Decision::from_slice(&[Action::Draw]);
        }
        Decision::new()
    }
}

/// Flip random face-down slots until two cards are up.
fn opening_flips(hand: &Hand, rng: &mut GameRng) -> Decision {
    let mut hidden: Vec<usize> = hand.face_down_slots().collect();
    rng.shuffle(&mut hidden);
    let needed = INITIAL_FLIPS.saturating_sub(hand.flipped_count());
    hidden.into_iter().take(needed).map(Action::FlipInitial).collect()
}

/// At least one cancelling column and a low exposed remainder.
fn is_good_layout(hand: &Hand) -> bool {
    let canceled: Vec<usize> = (0..COLUMNS).filter(|&c| hand.is_column_canceled(c)).collect();
    if canceled.is_empty() {
        return false;
    }
    let exposed: i32 = hand
        .face_up_slots()
        .filter(|&slot| !canceled.contains(&(slot % COLUMNS)))
        .map(|slot| i32::from(hand.cards()[slot].value))
        .sum();
    exposed <= SKIP_SUM_THRESHOLD
}

/// Slot whose replacement by `value` completes a vertical pair.
fn pair_slot(hand: &Hand, value: i8) -> Option<usize> {
    (0..HAND_SIZE).find_map(|slot| {
        let card = &hand.cards()[slot];
        let partner = partner_of(slot);
        let column = slot % COLUMNS;
        (card.face_up && card.value == value && !hand.is_column_matched(column)).then_some(partner)
    })
}

/// Highest face-up card outside a matched column that `value` strictly beats.
fn improve_slot(hand: &Hand, value: i8) -> Option<usize> {
    hand.face_up_slots()
        .filter(|&slot| !hand.is_column_matched(slot % COLUMNS))
        .filter(|&slot| hand.cards()[slot].value > value)
        .max_by_key(|&slot| (hand.cards()[slot].value, std::cmp::Reverse(slot)))
}

/// Face-down slot for a placeholder, preferring an untouched column.
fn placeholder_slot(hand: &Hand) -> Option<usize> {
    hand.face_down_slots()
        .find(|&slot| hand.is_face_down(partner_of(slot)))
        .or_else(|| hand.face_down_slots().next())
}

/// Where the top discard should go, if it is worth taking.
fn discard_target(hand: &Hand, value: i8) -> Option<usize> {
    pair_slot(hand, value)
        .or_else(|| improve_slot(hand, value))
        .or_else(|| {
            if value <= LOW_DISCARD {
                placeholder_slot(hand)
            } else {
                None
            }
        })
}

/// One face-down card left and a card in hand.
fn last_card_choice(hand: &Hand, drawn: Card) -> Action {
    let Some(slot) = hand.face_down_slots().next() else {
        return Action::DiscardDrawn;
    };
    let partner = &hand.cards()[partner_of(slot)];
    if partner.face_up && partner.value <= drawn.value {
        Action::Replace(slot)
    } else {
        Action::DiscardDrawn
    }
}

/// Place or discard a drawn card.
fn placement(hand: &Hand, drawn: Card, expected_unknown: Option<f64>) -> Action {
    if let Some(slot) = pair_slot(hand, drawn.value) {
        return Action::Replace(slot);
    }
    if drawn.value > HIGH_CARD {
        return Action::DiscardDrawn;
    }
    if let Some(slot) = improve_slot(hand, drawn.value) {
        return Action::Replace(slot);
    }
    let clearly_low = expected_unknown
        .is_some_and(|expected| f64::from(drawn.value) <= expected - EXPECTED_VALUE_MARGIN);
    if clearly_low {
        if let Some(slot) = placeholder_slot(hand) {
            return Action::Replace(slot);
        }
    }
    match hand.face_down_slots().next() {
        Some(slot) => Action::Replace(slot),
        None => Action::DiscardDrawn,
    }
}

/// Face-down slot to reveal, preferring one whose partner is already known.
fn flip_target(hand: &Hand) -> Option<usize> {
    hand.face_down_slots()
        .find(|&slot| !hand.is_face_down(partner_of(slot)))
        .or_else(|| hand.face_down_slots().next())
}

/// Mean value of the cards `seat` cannot see.
///
/// Starts from the full deck and removes every face-up card on the table,
/// the discard pile and the held card.
#[must_use]
pub fn expected_unknown_value(round: &RoundState, seat: SeatId) -> Option<f64> {
    let mut remaining: FxHashMap<i8, usize> = deck_values().map(|v| (v, copies_of(v))).collect();

    let hands = round.seats().values().flat_map(|s| s.hand.cards().iter());
    let seen = hands
        .filter(|c| c.face_up)
        .chain(round.discard_pile().iter())
        .chain(round.drawn_card().filter(|_| round.current_seat() == seat));
    for card in seen {
        if let Some(count) = remaining.get_mut(&card.value) {
            *count = count.saturating_sub(1);
        }
    }

    let (total, count) = remaining
        .iter()
        .fold((0i64, 0usize), |(total, count), (&value, &n)| {
            (total + i64::from(value) * n as i64, count + n)
        });
    (count > 0).then(|| total as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn hand(values: [i8; HAND_SIZE], up: &[usize]) -> Hand {
        let mut cards = values.map(|v| Card::new(CardId::new(0), v));
        for &slot in up {
            cards[slot].face_up = true;
        }
        Hand::new(cards)
    }

    fn card(value: i8) -> Card {
        Card::new(CardId::new(100), value).revealed()
    }

    #[test]
    fn test_opening_flips_two_distinct_slots() {
        let h = hand([1; 8], &[]);
        let decision = opening_flips(&h, &mut GameRng::new(4));
        assert_eq!(decision.len(), 2);
        assert_ne!(decision[0], decision[1]);

        let one_up = hand([1; 8], &[3]);
        let decision = opening_flips(&one_up, &mut GameRng::new(4));
        assert_eq!(decision.len(), 1);
        assert_ne!(decision[0], Action::FlipInitial(3));
    }

    #[test]
    fn test_good_layout() {
        // column 0 cancels (6|6), exposed 5 + 9
        let good = hand([6, 5, 9, 1, 6, 2, 3, 4], &[0, 4, 1, 2]);
        assert!(is_good_layout(&good));

        let no_pair = hand([6, 5, 9, 1, 7, 2, 3, 4], &[0, 4, 1, 2]);
        assert!(!is_good_layout(&no_pair));

        let too_high = hand([6, 12, 9, 1, 6, 2, 3, 4], &[0, 4, 1, 2, 7]);
        assert!(!is_good_layout(&too_high));
    }

    #[test]
    fn test_pair_slot_targets_partner() {
        let h = hand([7, 2, 0, 0, 1, 2, 0, 0], &[0, 1, 5]);
        assert_eq!(pair_slot(&h, 7), Some(4));
        // column 1 already matched
        assert_eq!(pair_slot(&h, 2), None);
    }

    #[test]
    fn test_improve_slot_picks_highest_unpaired() {
        let h = hand([11, 4, 4, 9, 0, 4, 0, 0], &[0, 1, 5, 3]);
        assert_eq!(improve_slot(&h, 5), Some(0));
        assert_eq!(improve_slot(&h, 11), None);
        // the 4s in column 1 are matched and never targeted
        assert_eq!(improve_slot(&h, 3), Some(0));
    }

    #[test]
    fn test_discard_target_placeholder_for_low_cards() {
        let h = hand([0, 1, 2, 2, 4, 5, 6, 7], &[0, 1, 2, 3]);
        assert_eq!(discard_target(&h, 3), Some(4));
        assert_eq!(discard_target(&h, 2), Some(6));
        assert_eq!(discard_target(&h, 8), None);
    }

    #[test]
    fn test_last_card_choice() {
        let h = hand([5, 1, 1, 1, 0, 1, 1, 1], &[0, 1, 2, 3, 5, 6, 7]);
        assert_eq!(last_card_choice(&h, card(5)), Action::Replace(4));
        assert_eq!(last_card_choice(&h, card(8)), Action::Replace(4));
        assert_eq!(last_card_choice(&h, card(2)), Action::DiscardDrawn);
    }

    #[test]
    fn test_placement_ladder() {
        let h = hand([8, 10, 0, 0, 0, 0, 0, 0], &[0, 1]);
        assert_eq!(placement(&h, card(10), Some(5.0)), Action::Replace(5));
        assert_eq!(placement(&h, card(11), Some(5.0)), Action::DiscardDrawn);
        assert_eq!(placement(&h, card(7), Some(5.0)), Action::Replace(1));
        assert_eq!(placement(&h, card(1), Some(5.0)), Action::Replace(1));

        let all_low = hand([1, 2, 1, 2, 0, 0, 0, 0], &[0, 1, 2, 3]);
        assert_eq!(placement(&all_low, card(3), Some(5.0)), Action::Replace(4));
        assert_eq!(placement(&all_low, card(9), Some(5.0)), Action::Replace(4));

        let revealed = hand([1, 2, 1, 2, 3, 4, 3, 4], &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(placement(&revealed, card(9), Some(5.0)), Action::DiscardDrawn);
    }

    #[test]
    fn test_expected_unknown_value_excludes_seen_cards() {
        use crate::core::SeatConfig;

        let seats = vec![SeatConfig::human("A"), SeatConfig::computer("B")];
        let mut round = RoundState::deal(&seats, false, &mut GameRng::new(2)).unwrap();
        let seat = SeatId::new(0);

        let top = round.discard_top().unwrap().value;
        let full_sum: f64 = deck_values().map(|v| f64::from(v) * copies_of(v) as f64).sum();
        let expected = (full_sum - f64::from(top)) / 107.0;
        let value = expected_unknown_value(&round, seat).unwrap();
        assert!((value - expected).abs() < 1e-9);

        round.flip_initial_card(seat, 0);
        let flipped = round.hand(seat).unwrap().cards()[0].value;
        let expected = (full_sum - f64::from(top) - f64::from(flipped)) / 106.0;
        let value = expected_unknown_value(&round, seat).unwrap();
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_decide_waits_for_turn_but_flips_openers() {
        use crate::core::SeatConfig;

        let seats = vec![SeatConfig::human("A"), SeatConfig::computer("B")];
        let mut rng = GameRng::new(2);
        let mut round = RoundState::deal(&seats, false, &mut rng).unwrap();
        let bot = SeatId::new(1);

        let decision = HeuristicPolicy.decide(&round, bot, &mut rng);
        assert_eq!(decision.len(), 2);
        for action in decision {
            assert!(round.apply(bot, action));
        }
        assert!(round.flags(bot).unwrap().initial_flips_done);
        assert!(HeuristicPolicy.decide(&round, bot, &mut rng).is_empty());
    }

    /// Two-seat round where seat 0 is to move with the given hand.
    fn table(values: [i8; HAND_SIZE], up: &[usize], allow_pass: bool) -> RoundState {
        use crate::core::SeatConfig;

        let seats = vec![SeatConfig::human("A"), SeatConfig::human("B")];
        let mut round = RoundState::deal(&seats, allow_pass, &mut GameRng::new(6)).unwrap();
        let seat = SeatId::new(0);
        let mut cards = *round.seats[seat].hand.cards();
        for (slot, (card, value)) in cards.iter_mut().zip(values).enumerate() {
            card.value = value;
            card.face_up = up.contains(&slot);
        }
        round.seats[seat].hand = Hand::new(cards);
        round.flags[seat].initial_flips_done = true;
        round
    }

    fn decide(round: &RoundState) -> Vec<Action> {
        HeuristicPolicy
            .decide(round, SeatId::new(0), &mut GameRng::new(1))
            .to_vec()
    }

    #[test]
    fn test_decide_passes_on_good_layout() {
        // column 0 cancels, exposed 5 + 2 + 1 + 2 + 3, slot 7 hidden
        let values = [6, 5, 2, 1, 6, 2, 3, 4];
        let up = [0, 1, 2, 3, 4, 5, 6];
        assert_eq!(decide(&table(values, &up, true)), vec![Action::Pass]);
        assert_ne!(decide(&table(values, &up, false)), vec![Action::Pass]);

        let high = [6, 12, 11, 1, 6, 2, 3, 4];
        assert_ne!(decide(&table(high, &up, true)), vec![Action::Pass]);
    }

    #[test]
    fn test_decide_takes_pairing_discard() {
        let mut round = table([7, 11, 0, 0, 0, 0, 0, 0], &[0, 1], false);
        if let Some(top) = round.discard_pile.last_mut() {
            top.value = 7;
        }
        let decision = decide(&round);
        assert_eq!(decision, vec![Action::PickUpDiscard, Action::Replace(4)]);

        let seat = SeatId::new(0);
        for action in decision {
            assert!(round.apply(seat, action));
        }
        assert!(round.hand(seat).unwrap().is_column_matched(0));
        assert_eq!(round.current_seat(), SeatId::new(1));
    }

    #[test]
    fn test_decide_settles_last_card() {
        let mut round = table([5, 1, 1, 1, 0, 1, 1, 1], &[0, 1, 2, 3, 5, 6, 7], false);
        round.flags[SeatId::new(0)].has_drawn_this_turn = true;

        round.drawn_card = Some(card(8));
        assert_eq!(decide(&round), vec![Action::Replace(4)]);

        round.drawn_card = Some(card(2));
        assert_eq!(decide(&round), vec![Action::DiscardDrawn]);
    }

    #[test]
    fn test_decide_pays_owed_flip_instead_of_retaking_discard() {
        let mut round = table([3, 9, 4, 8, 5, 5, 5, 5], &[0, 2], false);
        if let Some(front) = round.draw_pile.front_mut() {
            front.value = 3;
        }
        assert!(round.draw());
        assert!(round.discard_drawn());
        assert!(round.can_pick_up_discard());

        // the 3 on the discard would pair slot 0, but the seat just threw it away
        let decision = decide(&round);
        assert_eq!(decision, vec![Action::ResolveFlip(4)]);
        assert!(round.apply(SeatId::new(0), decision[0]));
        assert_eq!(round.current_seat(), SeatId::new(1));
    }

    #[test]
    fn test_flip_target_prefers_known_partner() {
        let h = hand([0; 8], &[2]);
        assert_eq!(flip_target(&h), Some(6));
        let none_known = hand([0; 8], &[]);
        assert_eq!(flip_target(&none_known), Some(0));
    }
}
