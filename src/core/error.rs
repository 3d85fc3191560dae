//! Error types surfaced outside the round engine.
//!
//! Round actions never error: an illegal action is a no-op. Errors only exist
//! at the edges, for table setup and snapshot persistence.

use thiserror::Error;

/// Table setup problems. The `Display` text is shown to the user as-is.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("at least {min} players required")]
    TooFewSeats { min: usize },
    #[error("at most {max} players allowed")]
    TooManySeats { max: usize },
    #[error("at least one human player required")]
    NoHumanSeat,
    #[error("player {seat} needs a name")]
    EmptyName { seat: usize },
    #[error("hole count must be between 1 and {max}")]
    InvalidHoleCount { max: u8 },
}

/// Failure to read or write raw snapshot bytes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn stored bytes back into a usable snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary decode error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("inconsistent snapshot: {0}")]
    Invalid(String),
}
