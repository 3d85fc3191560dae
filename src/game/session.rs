//! A full game of Golf: consecutive holes, the score ledger and the
//! computer driver.
//!
//! `Game` owns one `RoundState` at a time. Every action goes through
//! `Game::apply`, which forwards to the round, records history, and files
//! the hole's scores the moment the round finalizes.
//!
//! `Session` wraps a `Game` with a snapshot store and saves after every
//! state-changing step.

use serde::{Deserialize, Serialize};

use super::ledger::{running_totals, HoleScoreRecord};
use super::snapshot::{Snapshot, SnapshotFormat, SNAPSHOT_VERSION};
use super::store::{load_snapshot, save_snapshot, SnapshotStore};
use crate::computer::{DecisionPolicy, HeuristicPolicy, Pacer};
use crate::core::{Action, ActionRecord, GameRng, GolfConfig, SeatId, SeatMap, SetupError, SnapshotError};
use crate::round::RoundState;

/// Upper bound on computer actions per driver call. A hole never needs
/// anywhere near this many; it only guards against a policy that stalls.
const MAX_COMPUTER_STEPS: usize = 2_000;

/// Running and final score of one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatScores {
    /// Sum of face-up cards, column cancellation applied.
    pub visible: i32,
    /// Score with bonuses, once the hand is fully face up.
    pub final_with_bonus: Option<i32>,
}

/// A multi-hole game.
#[derive(Clone, Debug)]
pub struct Game {
    config: GolfConfig,
    round: RoundState,
    hole: u8,
    hole_scores: Vec<HoleScoreRecord>,
    history: im::Vector<ActionRecord>,
    sequence: u32,
    rng: GameRng,
}

impl Game {
    /// Validate the table and deal hole 1.
    ///
    /// Computer seats flip their opening cards straight away.
    pub fn new(config: GolfConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        let round = deal_hole(&config, &mut rng)?;
        let mut game = Self {
            config,
            round,
            hole: 1,
            hole_scores: Vec::new(),
            history: im::Vector::new(),
            sequence: 0,
            rng,
        };
        log::info!("hole 1 of {} dealt to {} seats", game.config.hole_count, game.round.seat_count());
        game.computer_opening_flips();
        Ok(game)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GolfConfig {
        &self.config
    }

    /// The current hole's state.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// 1-based hole number.
    #[must_use]
    pub fn hole_number(&self) -> u8 {
        self.hole
    }

    /// Finished holes, oldest first.
    #[must_use]
    pub fn hole_scores(&self) -> &[HoleScoreRecord] {
        &self.hole_scores
    }

    /// Every applied action since the game started.
    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        &self.history
    }

    /// Running and final scores for every seat this hole.
    #[must_use]
    pub fn seat_scores(&self) -> SeatMap<SeatScores> {
        SeatMap::new(self.round.seat_count(), |seat| SeatScores {
            visible: self.round.visible_score(seat).unwrap_or(0),
            final_with_bonus: self.round.final_score_with_bonus(seat),
        })
    }

    /// Cumulative score per seat over finished holes.
    #[must_use]
    pub fn totals(&self) -> SeatMap<i32> {
        running_totals(self.round.seat_count(), &self.hole_scores)
    }

    /// Seats with the lowest cumulative score.
    #[must_use]
    pub fn leaders(&self) -> Vec<SeatId> {
        let totals = self.totals();
        let Some(best) = totals.values().min().copied() else {
            return Vec::new();
        };
        totals
            .iter()
            .filter(|(_, total)| **total == best)
            .map(|(seat, _)| seat)
            .collect()
    }

    /// Last hole is scored.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.round.is_round_over() && self.hole >= self.config.hole_count
    }

    // === Play ===

    /// Apply one action for `seat`. Returns `false`, changing nothing, when
    /// the action is illegal.
    pub fn apply(&mut self, seat: SeatId, action: Action) -> bool {
        let was_over = self.round.is_round_over();
        if !self.round.apply(seat, action) {
            log::debug!("{} rejected for {}", action, seat);
            return false;
        }
        log::debug!("hole {}: {} {}", self.hole, seat, action);
        self.history
            .push_back(ActionRecord::new(seat, action, self.hole, self.sequence));
        self.sequence += 1;

        if !was_over {
            if let Some(results) = self.round.results() {
                self.hole_scores.push(HoleScoreRecord::new(self.hole, results));
            }
        }
        true
    }

    /// Let computer seats act until a human seat is current or the hole ends.
    ///
    /// Returns the number of actions applied.
    pub fn play_computer_turns<P, Q>(&mut self, policy: &P, pacer: &mut Q) -> usize
    where
        P: DecisionPolicy + ?Sized,
        Q: Pacer + ?Sized,
    {
        self.play_computer_turns_with(policy, pacer, |_| {})
    }

    /// Like `play_computer_turns`, calling `after_step` after every applied
    /// action.
    pub fn play_computer_turns_with<P, Q, F>(&mut self, policy: &P, pacer: &mut Q, mut after_step: F) -> usize
    where
        P: DecisionPolicy + ?Sized,
        Q: Pacer + ?Sized,
        F: FnMut(&Game),
    {
        let speed = self.config.ai_speed;
        let mut applied = 0;

        while applied < MAX_COMPUTER_STEPS && !self.round.is_round_over() && self.round.current_is_computer() {
            let seat = self.round.current_seat();
            let decision = policy.decide(&self.round, seat, &mut self.rng);
            if decision.is_empty() {
                log::warn!("policy had no move for {}", seat);
                break;
            }

            let mut progressed = false;
            for action in decision {
                if self.round.is_round_over() || self.round.current_seat() != seat {
                    break;
                }
                pacer.pause(speed);
                if !self.apply(seat, action) {
                    break;
                }
                progressed = true;
                applied += 1;
                after_step(self);
            }
            if !progressed {
                log::warn!("policy move for {} was illegal", seat);
                break;
            }
        }
        applied
    }

    /// Deal the next hole. Only possible once the current hole is scored and
    /// holes remain.
    pub fn next_hole(&mut self) -> bool {
        if !self.round.is_round_over() || self.hole >= self.config.hole_count {
            return false;
        }
        let Ok(round) = deal_hole(&self.config, &mut self.rng) else {
            return false;
        };
        self.round = round;
        self.hole += 1;
        self.sequence = 0;
        log::info!("hole {} of {} dealt", self.hole, self.config.hole_count);
        self.computer_opening_flips();
        true
    }

    fn computer_opening_flips(&mut self) {
        let computers: Vec<SeatId> = self
            .round
            .seats()
            .iter()
            .filter(|(_, s)| s.is_computer)
            .map(|(seat, _)| seat)
            .collect();
        for seat in computers {
            let decision = HeuristicPolicy.decide(&self.round, seat, &mut self.rng);
            for action in decision {
                if matches!(action, Action::FlipInitial(_)) {
                    self.apply(seat, action);
                }
            }
        }
    }

    // === Persistence ===

    /// Serializable copy of the whole game.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let round = &self.round;
        Snapshot {
            version: SNAPSHOT_VERSION,
            config: self.config.clone(),
            seat_count: round.seat_count(),
            current_seat: round.current,
            hands: round.seats.values().map(|s| s.hand.clone()).collect(),
            draw_pile: round.draw_pile.iter().copied().collect(),
            drawn_card: round.drawn_card,
            discard_pile: round.discard_pile.clone(),
            flags: round.flags.values().copied().collect(),
            round_over: round.round_over,
            hole_number: self.hole,
            hole_scores: self.hole_scores.clone(),
            final_turn: round.final_turn.clone(),
            revealed: round.revealed.values().copied().collect(),
            rng: Some(self.rng.state()),
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Rebuild a game from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let round = snapshot.to_round();
        let rng = match &snapshot.rng {
            Some(state) => GameRng::from_state(state),
            None => GameRng::new(u64::from(snapshot.hole_number)),
        };
        let history: im::Vector<ActionRecord> = snapshot.history.into_iter().collect();
        let sequence = history.iter().filter(|r| r.hole == snapshot.hole_number).count() as u32;
        Ok(Self {
            config: snapshot.config,
            round,
            hole: snapshot.hole_number,
            hole_scores: snapshot.hole_scores,
            history,
            sequence,
            rng,
        })
    }

    /// Resume the game saved in `store`, or start a new one if there is none
    /// or it cannot be used.
    pub fn resume_or_new<S>(config: GolfConfig, seed: u64, store: &S, format: SnapshotFormat) -> Result<Self, SetupError>
    where
        S: SnapshotStore + ?Sized,
    {
        if let Some(snapshot) = load_snapshot(store, format) {
            match Self::from_snapshot(snapshot) {
                Ok(game) => {
                    log::info!("resumed saved game at hole {}", game.hole);
                    return Ok(game);
                }
                Err(e) => log::warn!("ignoring saved game: {e}"),
            }
        }
        Self::new(config, seed)
    }

    /// Save to `store`. Failures are logged; returns whether it was stored.
    pub fn save_to<S>(&self, store: &mut S, format: SnapshotFormat) -> bool
    where
        S: SnapshotStore + ?Sized,
    {
        save_snapshot(store, &self.snapshot(), format)
    }
}

fn deal_hole(config: &GolfConfig, rng: &mut GameRng) -> Result<RoundState, SetupError> {
    RoundState::deal(&config.seats, config.skip_heuristic, rng).ok_or(SetupError::TooFewSeats {
        min: crate::core::MIN_SEATS,
    })
}

/// A game bound to a snapshot store, saved after every change.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    game: Game,
    store: S,
    format: SnapshotFormat,
}

impl<S: SnapshotStore> Session<S> {
    /// Resume from `store` or start fresh, then save.
    pub fn open(config: GolfConfig, seed: u64, store: S, format: SnapshotFormat) -> Result<Self, SetupError> {
        let game = Game::resume_or_new(config, seed, &store, format)?;
        let mut session = Self { game, store, format };
        session.save();
        Ok(session)
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply an action and save if it changed anything.
    pub fn apply(&mut self, seat: SeatId, action: Action) -> bool {
        let changed = self.game.apply(seat, action);
        if changed {
            self.save();
        }
        changed
    }

    /// Run computer turns, saving after each action.
    pub fn play_computer_turns<P, Q>(&mut self, policy: &P, pacer: &mut Q) -> usize
    where
        P: DecisionPolicy + ?Sized,
        Q: Pacer + ?Sized,
    {
        let Self { game, store, format } = self;
        game.play_computer_turns_with(policy, pacer, |g| {
            g.save_to(store, *format);
        })
    }

    /// Deal the next hole and save.
    pub fn next_hole(&mut self) -> bool {
        let changed = self.game.next_hole();
        if changed {
            self.save();
        }
        changed
    }

    /// Drop the saved game and start over with `config`.
    pub fn restart(&mut self, config: GolfConfig, seed: u64) -> Result<(), SetupError> {
        self.game = Game::new(config, seed)?;
        self.save();
        Ok(())
    }

    /// Release the game and its store.
    #[must_use]
    pub fn into_parts(self) -> (Game, S) {
        (self.game, self.store)
    }

    fn save(&mut self) {
        self.game.save_to(&mut self.store, self.format);
    }
}
