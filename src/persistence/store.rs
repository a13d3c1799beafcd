//! Single-file snapshot storage.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::snapshot::{GameStateSnapshot, SnapshotFormat};
use crate::core::PersistenceError;

/// Saves and loads one snapshot file.
///
/// Saves go to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old file or the new
/// one, never a partial write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// JSON store at `path`.
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, SnapshotFormat::Json)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Atomically replace the stored snapshot.
    pub fn save(&self, snapshot: &GameStateSnapshot) -> Result<(), PersistenceError> {
        let bytes = snapshot.encode(self.format)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), format = ?self.format, "snapshot saved");
        Ok(())
    }

    pub fn load(&self) -> Result<GameStateSnapshot, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::MissingSnapshot(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot = GameStateSnapshot::decode(&bytes, self.format)?;
        debug!(path = %self.path.display(), moves = snapshot.moves.len(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Delete the stored snapshot. Returns false if there was none.
    pub fn clear(&self) -> Result<bool, PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
