//! Per-hole score records.

use serde::{Deserialize, Serialize};

use crate::core::{SeatId, SeatMap};
use crate::scoring::ScoreBreakdown;

/// Scores of one finished hole. Never changed after it is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScoreRecord {
    /// 1-based hole number.
    pub hole_number: u8,
    /// Final score per seat, in seat order.
    pub score_per_seat: Vec<i32>,
    /// Itemized score per seat, in seat order.
    pub breakdown_per_seat: Vec<ScoreBreakdown>,
}

impl HoleScoreRecord {
    /// Build a record from a finished round's breakdowns.
    #[must_use]
    pub fn new(hole_number: u8, breakdowns: &SeatMap<ScoreBreakdown>) -> Self {
        Self {
            hole_number,
            score_per_seat: breakdowns.values().map(|b| b.total).collect(),
            breakdown_per_seat: breakdowns.values().cloned().collect(),
        }
    }

    /// A seat's score on this hole.
    #[must_use]
    pub fn score(&self, seat: SeatId) -> Option<i32> {
        self.score_per_seat.get(seat.index()).copied()
    }
}

/// Cumulative score per seat over `records`.
#[must_use]
pub fn running_totals<'a>(seat_count: usize, records: impl IntoIterator<Item = &'a HoleScoreRecord>) -> SeatMap<i32> {
    let mut totals = SeatMap::with_value(seat_count, 0);
    for record in records {
        for seat in SeatId::all(seat_count) {
            totals[seat] += record.score(seat).unwrap_or(0);
        }
    }
    totals
}
