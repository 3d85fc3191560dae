//! Table configuration.
//!
//! A `GolfConfig` is built once at setup time and validated before the first
//! hole is dealt:
//! - `SeatConfig`: who sits where (name, color, human or computer)
//! - `AiSpeed`: cosmetic pacing for computer seats
//! - `skip_heuristic`: lets seats pass when one card is left face down

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::SetupError;

/// Fewest seats a table may have.
pub const MIN_SEATS: usize = 2;

/// Most seats a table may have (6 × 8 = 48 dealt cards).
pub const MAX_SEATS: usize = 6;

/// Holes in a full game.
pub const FULL_GAME_HOLES: u8 = 9;

/// Pacing between computer steps. Never changes what the computer decides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AiSpeed {
    /// Delay between two computer steps.
    #[must_use]
    pub const fn delay(self) -> Duration {
        match self {
            AiSpeed::Slow => Duration::from_millis(1200),
            AiSpeed::Normal => Duration::from_millis(700),
            AiSpeed::Fast => Duration::from_millis(350),
        }
    }
}

/// Configuration for a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    pub name: String,

    /// Display color (opaque to the engine, e.g. `"#3b82f6"`).
    pub color: String,

    /// Seat is played by the computer policy.
    pub is_computer: bool,
}

impl SeatConfig {
    /// A human-controlled seat.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: String::new(),
            is_computer: false,
        }
    }

    /// A computer-controlled seat.
    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: String::new(),
            is_computer: true,
        }
    }

    /// Set the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfConfig {
    /// Seats in turn order.
    pub seats: Vec<SeatConfig>,

    /// Computer pacing.
    #[serde(default)]
    pub ai_speed: AiSpeed,

    /// Allow ending a turn without drawing when exactly one card is face
    /// down. Computer seats use it through a tunable heuristic.
    #[serde(default)]
    pub skip_heuristic: bool,

    /// Holes to play (a full game is 9).
    #[serde(default = "default_hole_count")]
    pub hole_count: u8,
}

fn default_hole_count() -> u8 {
    FULL_GAME_HOLES
}

impl Default for GolfConfig {
    fn default() -> Self {
        Self {
            seats: vec![SeatConfig::human("You"), SeatConfig::computer("Computer")],
            ai_speed: AiSpeed::default(),
            skip_heuristic: false,
            hole_count: FULL_GAME_HOLES,
        }
    }
}

impl GolfConfig {
    /// Create a configuration with the given seats and default options.
    pub fn new(seats: Vec<SeatConfig>) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }

    /// Add a seat.
    #[must_use]
    pub fn with_seat(mut self, seat: SeatConfig) -> Self {
        self.seats.push(seat);
        self
    }

    /// Set computer pacing.
    #[must_use]
    pub fn with_ai_speed(mut self, speed: AiSpeed) -> Self {
        self.ai_speed = speed;
        self
    }

    /// Enable or disable passing with one card left.
    #[must_use]
    pub fn with_skip_heuristic(mut self, enabled: bool) -> Self {
        self.skip_heuristic = enabled;
        self
    }

    /// Set the number of holes.
    #[must_use]
    pub fn with_hole_count(mut self, holes: u8) -> Self {
        self.hole_count = holes;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Check the table can start. Reports the first problem found.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.seats.len() < MIN_SEATS {
            return Err(SetupError::TooFewSeats { min: MIN_SEATS });
        }
        if self.seats.len() > MAX_SEATS {
            return Err(SetupError::TooManySeats { max: MAX_SEATS });
        }
        if let Some(seat) = self.seats.iter().position(|s| s.name.trim().is_empty()) {
            return Err(SetupError::EmptyName { seat: seat + 1 });
        }
        if self.seats.iter().all(|s| s.is_computer) {
            return Err(SetupError::NoHumanSeat);
        }
        if self.hole_count == 0 || self.hole_count > FULL_GAME_HOLES {
            return Err(SetupError::InvalidHoleCount { max: FULL_GAME_HOLES });
        }
        Ok(())
    }
}
