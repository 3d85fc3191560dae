//! Scoring rules checked against worked examples.

use golf_engine::cards::{Card, CardId, Hand};
use golf_engine::scoring::{explain_score, final_score, visible_score};

fn revealed(values: [i8; 8]) -> Hand {
    let mut id = 0;
    Hand::new(values.map(|v| {
        id += 1;
        Card::new(CardId::new(id), v).revealed()
    }))
}

fn partly(values: [i8; 8], up: &[usize]) -> Hand {
    let mut cards = values.map(|v| Card::new(CardId::new(0), v));
    for &slot in up {
        cards[slot].face_up = true;
    }
    Hand::new(cards)
}

/// Test the plain hand with one cancelled column.
#[test]
fn test_one_matched_column() {
    let hand = revealed([4, 7, 5, 1, 4, 2, 8, 0]);
    assert_eq!(final_score(&hand), 23);
    let breakdown = explain_score(&hand);
    assert!(breakdown.columns[0].canceled);
    assert_eq!(breakdown.bonus(), 0);
}

/// Test four matching columns of the same value.
#[test]
fn test_four_matched_columns() {
    assert_eq!(final_score(&revealed([4; 8])), -20);
}

/// Test all four -5 cards held as two -5 columns.
#[test]
fn test_four_penalty_cards() {
    let hand = revealed([-5, 3, -5, 7, -5, 6, -5, 4]);
    assert_eq!(final_score(&hand), -10);
    let breakdown = explain_score(&hand);
    assert_eq!(breakdown.raw, 0);
    assert_eq!(breakdown.penalty_bonus, -10);
    let pairs: Vec<bool> = breakdown.columns.iter().map(|c| c.is_minus_five_pair).collect();
    assert_eq!(pairs, vec![true, false, true, false]);
}

/// Test cancelled columns of different values: no group bonus.
#[test]
fn test_two_column_group() {
    let hand = revealed([0, 1, 6, 6, 0, 0, 12, 6]);
    assert_eq!(final_score(&hand), 19);
    let breakdown = explain_score(&hand);
    assert_eq!(breakdown.group_bonus, 0);
}

/// Test that cancellation never raises the naive sum of face-up cards.
#[test]
fn test_cancellation_never_increases_score() {
    let samples = [
        [4, 7, 5, 1, 4, 2, 8, 0],
        [12, 12, 3, 3, 12, 11, 3, 2],
        [-5, 0, 9, 9, -5, 0, 9, 1],
        [6, 6, 6, 6, 6, 6, 6, 6],
    ];
    for values in samples {
        let hand = revealed(values);
        let naive: i32 = values.iter().map(|&v| i32::from(v)).sum();
        assert!(visible_score(&hand) <= naive, "{values:?}");
    }
}

/// Test that each reveal adds the card's value until its column cancels.
#[test]
fn test_visible_score_tracks_reveals() {
    let values = [3, 9, 2, 11, 3, 4, 0, 7];
    let mut up = Vec::new();
    let mut last = visible_score(&partly(values, &up));
    assert_eq!(last, 0);

    for slot in [1, 3, 6, 7] {
        up.push(slot);
        let now = visible_score(&partly(values, &up));
        assert_eq!(now, last + i32::from(values[slot]));
        last = now;
    }

    // column 0 is 3 over 3
    up.push(0);
    assert_eq!(visible_score(&partly(values, &up)), last + 3);
    up.push(4);
    assert_eq!(visible_score(&partly(values, &up)), last);
}
