//! # golf-engine
//!
//! Round engine for Golf, the 2-to-6 player card-matching game.
//!
//! Each player holds eight cards in a 2 × 4 grid, mostly face down, and
//! tries to finish a hole with the lowest score. Matching cards in a column
//! cancel out; groups of matched columns earn bonuses. When one hand is fully
//! face up, every other player gets exactly one more turn.
//!
//! ## Design Principles
//!
//! 1. **Illegal means no-op**: every action returns `bool`. An action that
//!    is not allowed right now changes nothing.
//!
//! 2. **Single actor**: only the current seat acts, except for the two
//!    opening flips, which any seat may make at any time.
//!
//! 3. **Explicit hooks**: after each successful action the round checks for
//!    a new full reveal, then advances the final-turn sequence or rotates
//!    control. The computer driver runs after that, one step at a time.
//!
//! 4. **Deterministic**: all randomness comes from a seeded `GameRng`, whose
//!    position is part of every snapshot.
//!
//! ## Modules
//!
//! - `core`: seats, actions, RNG, configuration, errors
//! - `cards`: cards, hands, the 108-card deck
//! - `scoring`: visible and final scores, itemized breakdowns
//! - `round`: one hole: turn actions and the final-turn coordinator
//! - `computer`: decision policies and pacing
//! - `game`: multi-hole sessions, snapshots and storage

pub mod core;
pub mod cards;
pub mod scoring;
pub mod round;
pub mod computer;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AiSpeed, GameRng, GameRngState, GolfConfig, SeatConfig, SeatId, SeatMap,
    SetupError, SnapshotError, StoreError, FULL_GAME_HOLES, MAX_SEATS, MIN_SEATS,
};

pub use crate::cards::{Card, CardId, Hand, DECK_SIZE, HAND_SIZE};

pub use crate::scoring::{explain_score, final_score, visible_score, ColumnScore, ScoreBreakdown};

pub use crate::round::{FinalTurnState, RoundState, Seat, SeatFlags, SeatPhase};

pub use crate::computer::{
    Decision, DecisionPolicy, HeuristicPolicy, NoPacing, Pacer, RandomPolicy, RecordingPacer, SleepPacing,
};

pub use crate::game::{
    FileStore, Game, HoleScoreRecord, MemoryStore, SeatScores, Session, Snapshot, SnapshotFormat,
    SnapshotStore, SNAPSHOT_VERSION,
};
