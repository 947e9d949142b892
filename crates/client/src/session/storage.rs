//! Durable storage for the persisted subset of the session.
//!
//! Only the `{user, token}` pair is ever written; derived and transient
//! flags are recomputed at load time. The backend is pluggable so tests
//! can run without touching the filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// The durable subset of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Identity of the logged-in user, if any.
    #[serde(default)]
    pub user: Option<User>,
    /// Opaque bearer token, if any.
    #[serde(default)]
    pub token: Option<String>,
}

/// Errors that can occur reading or writing session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored data is not valid JSON for a session.
    #[error("corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A key-value persistence backend for the session.
///
/// Implementations must tolerate `store` and `clear` being called on every
/// session mutation; the session store treats failures as non-fatal.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted pair. A missing entry is the empty session, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing data exists but cannot be
    /// read or parsed.
    fn load(&self) -> Result<PersistedSession, StorageError>;

    /// Replace the persisted pair.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the data cannot be written.
    fn store(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove the persisted pair entirely.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the data cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON-file-backed session storage.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write can never leave a half-written `{user, token}` pair.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Create storage backed by the given file path. The file and its
    /// parent directories are created lazily on first store.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this storage reads and writes.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<PersistedSession, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(PersistedSession::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session storage for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entry: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a persisted pair, as if a previous process
    /// had logged in.
    #[must_use]
    pub fn seeded(session: PersistedSession) -> Self {
        Self {
            entry: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<PersistedSession, StorageError> {
        let entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entry.clone().unwrap_or_default())
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let mut entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *entry = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *entry = None;
        Ok(())
    }
}
