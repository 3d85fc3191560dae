//! Versioned game snapshots.
//!
//! A `Snapshot` is a plain, serializable copy of everything needed to resume
//! a game: table config, every card, the turn flags, the final-turn sequence,
//! past hole scores and the RNG position. Two encodings are supported:
//! human-readable JSON and compact bincode.
//!
//! Decoding validates the snapshot before anything is built from it.
//! Fields beyond the core layout carry `#[serde(default)]` so a minimal
//! JSON save still loads.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::ledger::HoleScoreRecord;
use crate::cards::{copies_of, deck_values, Card, Hand, DECK_SIZE};
use crate::core::{
    ActionRecord, GameRngState, GolfConfig, SeatId, SeatMap, SnapshotError, MAX_SEATS, MIN_SEATS,
};
use crate::round::{FinalTurnState, RoundState, Seat, SeatFlags};
use crate::scoring::explain_score;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Byte encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// bincode.
    Binary,
}

/// Serializable copy of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub config: GolfConfig,
    pub seat_count: usize,
    pub current_seat: SeatId,
    pub hands: Vec<Hand>,
    /// Top first.
    pub draw_pile: Vec<Card>,
    pub drawn_card: Option<Card>,
    /// Top last.
    pub discard_pile: Vec<Card>,
    pub flags: Vec<SeatFlags>,
    pub round_over: bool,
    pub hole_number: u8,
    pub hole_scores: Vec<HoleScoreRecord>,
    #[serde(default)]
    pub final_turn: Option<FinalTurnState>,
    #[serde(default)]
    pub revealed: Vec<bool>,
    #[serde(default)]
    pub rng: Option<GameRngState>,
    #[serde(default)]
    pub history: Vec<ActionRecord>,
}

impl Snapshot {
    /// Encode in the given format.
    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, SnapshotError> {
        Ok(match format {
            SnapshotFormat::Json => serde_json::to_vec_pretty(self)?,
            SnapshotFormat::Binary => bincode::serialize(self)?,
        })
    }

    /// Decode and validate.
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let snapshot: Self = match format {
            SnapshotFormat::Json => serde_json::from_slice(bytes)?,
            SnapshotFormat::Binary => bincode::deserialize(bytes)?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the snapshot describes a reachable game.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        self.config
            .validate()
            .map_err(|e| SnapshotError::Invalid(e.to_string()))?;

        let n = self.seat_count;
        if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
            return invalid(format!("seat count {n} out of range"));
        }
        if self.config.seat_count() != n || self.hands.len() != n || self.flags.len() != n {
            return invalid("seat count disagrees with seats, hands or flags");
        }
        if !self.revealed.is_empty() && self.revealed.len() != n {
            return invalid("revealed flags do not match seat count");
        }
        if self.current_seat.index() >= n {
            return invalid(format!("current seat {} out of range", self.current_seat.index()));
        }
        if self.hole_number == 0 || self.hole_number > self.config.hole_count {
            return invalid(format!("hole {} out of range", self.hole_number));
        }

        let finished = usize::from(self.hole_number) - 1 + usize::from(self.round_over);
        if self.hole_scores.len() != finished {
            return invalid("hole score history does not match hole number");
        }
        if self.hole_scores.iter().any(|r| r.score_per_seat.len() != n) {
            return invalid("hole score has wrong seat count");
        }

        if self.round_over && (self.drawn_card.is_some() || self.final_turn.is_some()) {
            return invalid("finished hole still has a turn in progress");
        }
        if let Some(ft) = &self.final_turn {
            let mut seats = std::iter::once(&ft.final_turn_seat)
                .chain(ft.queue.iter())
                .chain(ft.completed.iter());
            if seats.any(|s| s.index() >= n) {
                return invalid("final-turn seat out of range");
            }
        }
        if self
            .hands
            .iter()
            .any(|h| h.recount_flipped() != h.flipped_count())
        {
            return invalid("hand face-up count is stale");
        }

        self.validate_cards()
    }

    fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.drawn_card.iter())
            .chain(self.hands.iter().flat_map(|h| h.cards().iter()))
    }

    /// Every card exactly once, and the deck's makeup per value intact.
    fn validate_cards(&self) -> Result<(), SnapshotError> {
        let mut ids = FxHashSet::default();
        let mut per_value: FxHashMap<i8, usize> = FxHashMap::default();
        let mut count = 0;
        for card in self.cards() {
            count += 1;
            if copies_of(card.value) == 0 {
                return invalid(format!("card value {} is not in the deck", card.value));
            }
            if !ids.insert(card.id) {
                return invalid(format!("card {} appears twice", card.id.0));
            }
            *per_value.entry(card.value).or_default() += 1;
        }
        if count != DECK_SIZE {
            return invalid(format!("expected {DECK_SIZE} cards, found {count}"));
        }
        for value in deck_values() {
            let found = per_value.get(&value).copied().unwrap_or(0);
            if found != copies_of(value) {
                return invalid(format!(
                    "expected {} cards of value {value}, found {found}",
                    copies_of(value)
                ));
            }
        }
        Ok(())
    }

    /// Rebuild the round this snapshot describes.
    ///
    /// Call only on a validated snapshot.
    pub(crate) fn to_round(&self) -> RoundState {
        let n = self.seat_count;
        let seats = self
            .config
            .seats
            .iter()
            .zip(self.hands.iter())
            .map(|(config, hand)| Seat {
                hand: hand.clone(),
                is_computer: config.is_computer,
                display_name: config.name.clone(),
                color: config.color.clone(),
            })
            .collect();
        let seats = SeatMap::from_vec(seats);

        let revealed = if self.revealed.len() == n {
            SeatMap::from_vec(self.revealed.clone())
        } else {
            SeatMap::new(n, |seat| self.hands[seat.index()].is_fully_revealed())
        };
        let results = self
            .round_over
            .then(|| SeatMap::new(n, |seat| explain_score(&self.hands[seat.index()])));

        RoundState {
            seats,
            flags: SeatMap::from_vec(self.flags.clone()),
            current: self.current_seat,
            drawn_card: self.drawn_card,
            discard_pile: self.discard_pile.clone(),
            draw_pile: self.draw_pile.iter().copied().collect::<VecDeque<_>>(),
            final_turn: self.final_turn.clone(),
            revealed,
            round_over: self.round_over,
            results,
            allow_pass: self.config.skip_heuristic,
        }
    }
}

fn invalid<T>(reason: impl Into<String>) -> Result<T, SnapshotError> {
    Err(SnapshotError::Invalid(reason.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, SeatConfig};

    fn sample() -> Snapshot {
        let config = GolfConfig::default();
        let mut rng = GameRng::new(21);
        let round = RoundState::deal(&config.seats, false, &mut rng).unwrap();
        Snapshot {
            version: SNAPSHOT_VERSION,
            seat_count: 2,
            current_seat: round.current_seat(),
            hands: round.seats().values().map(|s| s.hand.clone()).collect(),
            draw_pile: round.draw_pile.iter().copied().collect(),
            drawn_card: None,
            discard_pile: round.discard_pile.clone(),
            flags: round.flags.values().copied().collect(),
            round_over: false,
            hole_number: 1,
            hole_scores: Vec::new(),
            final_turn: None,
            revealed: vec![false, false],
            rng: Some(rng.state()),
            history: Vec::new(),
            config,
        }
    }

    #[test]
    fn test_sample_is_valid_and_rebuilds() {
        let snapshot = sample();
        snapshot.validate().unwrap();
        let round = snapshot.to_round();
        assert_eq!(round.total_cards(), DECK_SIZE);
        assert_eq!(round.seat(SeatId::new(1)).unwrap().display_name, "Computer");
    }

    #[test]
    fn test_json_and_binary_decode() {
        let snapshot = sample();
        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let bytes = snapshot.encode(format).unwrap();
            assert_eq!(Snapshot::decode(&bytes, format).unwrap(), snapshot);
        }
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut snapshot = sample();
        snapshot.version = 99;
        let bytes = snapshot.encode(SnapshotFormat::Json).unwrap();
        let err = Snapshot::decode(&bytes, SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, SnapshotError::Version { found: 99, expected: 1 }));
    }

    #[test]
    fn test_rejects_missing_card() {
        let mut snapshot = sample();
        snapshot.draw_pile.pop();
        assert!(matches!(snapshot.validate(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_rejects_duplicate_card() {
        let mut snapshot = sample();
        let first = snapshot.draw_pile[0];
        snapshot.draw_pile[1] = Card { id: first.id, ..snapshot.draw_pile[1] };
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_value() {
        let mut snapshot = sample();
        snapshot.draw_pile[0] = Card::new(snapshot.draw_pile[0].id, 13);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_value_between_penalty_and_zero() {
        let mut snapshot = sample();
        for card in snapshot.draw_pile.iter_mut().take(2) {
            *card = Card::new(card.id, -3);
        }
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("-3"), "{err}");
    }

    #[test]
    fn test_rejects_wrong_value_mix() {
        let mut snapshot = sample();
        let first = snapshot.draw_pile[0];
        let other = if first.value == 12 { 11 } else { 12 };
        snapshot.draw_pile[0] = Card::new(first.id, other);
        assert!(matches!(snapshot.validate(), Err(SnapshotError::Invalid(_))));

        // two cards swapping values keeps the mix, so it still loads
        let mut snapshot = sample();
        let (a, b) = (snapshot.draw_pile[0], snapshot.draw_pile[1]);
        snapshot.draw_pile[0] = Card::new(a.id, b.value);
        snapshot.draw_pile[1] = Card::new(b.id, a.value);
        snapshot.validate().unwrap();
    }

    #[test]
    fn test_rejects_seat_mismatch() {
        let mut snapshot = sample();
        snapshot.seat_count = 3;
        assert!(snapshot.validate().is_err());

        let mut snapshot = sample();
        snapshot.current_seat = SeatId::new(4);
        assert!(snapshot.validate().is_err());

        let mut snapshot = sample();
        snapshot.config = snapshot.config.with_seat(SeatConfig::computer("Extra"));
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_hole() {
        let mut snapshot = sample();
        snapshot.hole_number = 0;
        assert!(snapshot.validate().is_err());

        let mut snapshot = sample();
        snapshot.hole_number = 2;
        assert!(snapshot.validate().is_err(), "hole 2 needs one finished hole");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Snapshot::decode(b"{not json", SnapshotFormat::Json),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Snapshot::decode(&[1, 2, 3], SnapshotFormat::Binary),
            Err(SnapshotError::Binary(_))
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let snapshot = sample();
        let mut value = serde_json::to_value(&snapshot).unwrap();
        let object = value.as_object_mut().unwrap();
        for key in ["final_turn", "revealed", "rng", "history"] {
            object.remove(key);
        }
        let bytes = serde_json::to_vec(&value).unwrap();
        let decoded = Snapshot::decode(&bytes, SnapshotFormat::Json).unwrap();
        assert!(decoded.revealed.is_empty());
        assert!(decoded.rng.is_none());

        let round = decoded.to_round();
        assert!(round.revealed.values().all(|r| !r));
    }
}
