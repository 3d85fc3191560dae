//! Core engine types: seats, actions, RNG, configuration, errors.
//!
//! These are the building blocks shared by the round engine, the computer
//! policy and the session layer.

pub mod seat;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use seat::{SeatId, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use config::{AiSpeed, GolfConfig, SeatConfig, FULL_GAME_HOLES, MAX_SEATS, MIN_SEATS};
pub use action::{Action, ActionRecord};
pub use error::{SetupError, SnapshotError, StoreError};
