//! Where snapshots live.
//!
//! Stores move raw bytes only. Saving and loading are best effort: a failed
//! write or an unreadable snapshot is logged and play continues.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::snapshot::{Snapshot, SnapshotFormat};
use crate::core::StoreError;

/// Byte storage for a single snapshot slot.
pub trait SnapshotStore {
    /// The stored bytes, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the stored bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError>;

    /// Forget the stored snapshot.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory slot, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing bytes.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.bytes = None;
        Ok(())
    }
}

/// A single file on disk. A missing file reads as empty.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Read and validate a snapshot. Anything unusable is logged and ignored.
pub fn load_snapshot<S: SnapshotStore + ?Sized>(store: &S, format: SnapshotFormat) -> Option<Snapshot> {
    let bytes = match store.read() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read snapshot: {e}");
            return None;
        }
    };
    match Snapshot::decode(&bytes, format) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("ignoring saved game: {e}");
            None
        }
    }
}

/// Encode and write a snapshot. Returns whether it was stored.
pub fn save_snapshot<S: SnapshotStore + ?Sized>(store: &mut S, snapshot: &Snapshot, format: SnapshotFormat) -> bool {
    let result = snapshot
        .encode(format)
        .map_err(|e| e.to_string())
        .and_then(|bytes| store.write(&bytes).map_err(|e| e.to_string()));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("could not save game: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);
        store.write(b"abc").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(&b"abc"[..]));
        store.clear().unwrap();
        assert!(store.bytes().is_none());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = std::env::temp_dir().join(format!("golf-store-{}", std::process::id()));
        let mut store = FileStore::new(dir.join("save.json"));
        assert_eq!(store.read().unwrap(), None);

        store.write(b"{}").unwrap();
        assert_eq!(store.read().unwrap(), Some(b"{}".to_vec()));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_ignores_garbage() {
        let store = MemoryStore::with_bytes(&b"not a snapshot"[..]);
        assert!(load_snapshot(&store, SnapshotFormat::Json).is_none());
        assert!(load_snapshot(&MemoryStore::new(), SnapshotFormat::Binary).is_none());
    }
}
