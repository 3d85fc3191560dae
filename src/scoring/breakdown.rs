//! Column scoring, cancellation groups and bonuses.
//!
//! ## Rules
//!
//! - A column of two equal ordinary values cancels to 0.
//! - A column of two -5 cards scores -10 and does not cancel.
//! - Cancelled columns sharing one value form a group. The largest group
//!   earns a bonus: 2 → -10, 3 → -15, 4 → -20. Cancelled columns of
//!   different values never combine.
//! - Holding all four -5 cards earns a further -10.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Hand, COLUMNS, PENALTY_VALUE};

/// Bonus for holding all four penalty cards.
pub const FOUR_PENALTY_BONUS: i32 = -10;

/// Bonus for a group of `size` cancelled columns of one value.
#[must_use]
pub const fn bonus_for_group(size: usize) -> i32 {
    match size {
        2 => -10,
        3 => -15,
        4 => -20,
        _ => 0,
    }
}

/// Score of one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub top: i8,
    pub bottom: i8,
    /// Points this column adds to the raw total.
    pub contribution: i32,
    /// Equal ordinary values, scoring 0.
    pub canceled: bool,
    /// Two -5 cards, scoring -10.
    pub is_minus_five_pair: bool,
    /// Part of the cancellation group that earned the group bonus.
    pub counts_toward_bonus: bool,
}

/// Itemized final score of a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub columns: [ColumnScore; COLUMNS],
    /// Sum of column contributions.
    pub raw: i32,
    /// Bonus for the largest same-value cancellation group.
    pub group_bonus: i32,
    /// Bonus for holding all four -5 cards.
    pub penalty_bonus: i32,
    /// `raw + group_bonus + penalty_bonus`.
    pub total: i32,
}

impl ScoreBreakdown {
    /// Both bonuses together.
    #[must_use]
    pub fn bonus(&self) -> i32 {
        self.group_bonus + self.penalty_bonus
    }
}

/// Running score from face-up cards.
///
/// A column whose two cards are face up and equal (not -5) scores 0;
/// otherwise each face-up card scores its value and face-down cards score 0.
#[must_use]
pub fn visible_score(hand: &Hand) -> i32 {
    (0..COLUMNS)
        .map(|column| {
            if hand.is_column_canceled(column) {
                return 0;
            }
            let (top, bottom) = hand.column(column);
            [top, bottom]
                .iter()
                .filter(|c| c.face_up)
                .map(|c| i32::from(c.value))
                .sum::<i32>()
        })
        .sum()
}

/// Final score of a hand. Face state is ignored: every card counts.
#[must_use]
pub fn final_score(hand: &Hand) -> i32 {
    explain_score(hand).total
}

/// Final score of a hand, itemized per column.
#[must_use]
pub fn explain_score(hand: &Hand) -> ScoreBreakdown {
    let mut groups: FxHashMap<i8, usize> = FxHashMap::default();
    let mut columns = [ColumnScore {
        top: 0,
        bottom: 0,
        contribution: 0,
        canceled: false,
        is_minus_five_pair: false,
        counts_toward_bonus: false,
    }; COLUMNS];

    for (column, score) in columns.iter_mut().enumerate() {
        let (top, bottom) = hand.column(column);
        score.top = top.value;
        score.bottom = bottom.value;

        if top.value == bottom.value && top.value != PENALTY_VALUE {
            score.canceled = true;
            *groups.entry(top.value).or_default() += 1;
        } else if top.value == bottom.value {
            score.is_minus_five_pair = true;
            score.contribution = 2 * i32::from(PENALTY_VALUE);
        } else {
            score.contribution = i32::from(top.value) + i32::from(bottom.value);
        }
    }

    // Ties between equally sized groups: the lower value is tagged.
    let largest = groups
        .iter()
        .max_by(|(va, sa), (vb, sb)| sa.cmp(sb).then(vb.cmp(va)))
        .map(|(&value, &size)| (value, size));

    let group_bonus = largest.map_or(0, |(_, size)| bonus_for_group(size));
    if let Some((value, size)) = largest {
        if bonus_for_group(size) != 0 {
            for score in columns.iter_mut().filter(|s| s.canceled && s.top == value) {
                score.counts_toward_bonus = true;
            }
        }
    }

    let penalties = hand.cards().iter().filter(|c| c.is_penalty()).count();
    let penalty_bonus = if penalties == 4 { FOUR_PENALTY_BONUS } else { 0 };

    let raw = columns.iter().map(|c| c.contribution).sum();
    ScoreBreakdown {
        columns,
        raw,
        group_bonus,
        penalty_bonus,
        total: raw + group_bonus + penalty_bonus,
    }
}
