//! Game sessions spanning several holes.
//!
//! - `Game`: hole sequencing, score ledger, action history, computer driver
//! - `Session`: a `Game` that saves itself after every change
//! - `Snapshot`: versioned, validated save format (JSON or bincode)
//! - `SnapshotStore`: where snapshot bytes live

pub mod ledger;
pub mod snapshot;
pub mod store;
pub mod session;

pub use ledger::{running_totals, HoleScoreRecord};
pub use snapshot::{Snapshot, SnapshotFormat, SNAPSHOT_VERSION};
pub use store::{load_snapshot, save_snapshot, FileStore, MemoryStore, SnapshotStore};
pub use session::{Game, SeatScores, Session};
