//! Durable key-value storage backing the session.
//!
//! Two string keys are all the session needs, so the abstraction is a tiny
//! string-to-string map. [`FileStore`] keeps one file per key on disk;
//! [`MemoryStore`] keeps everything in a `HashMap` for tests and ephemeral runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AdminError, Result};

// ── KeyValueStore ──────────────────────────────────────────────────────────────

/// String-keyed persistence with synchronous, non-blocking access.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

// ── FileStore ──────────────────────────────────────────────────────────────────

/// One file per key under a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location: `~/.formation-admin/storage/`.
    pub fn default_dir() -> PathBuf {
        Self::default_dir_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Storage directory rooted at `base_dir` (used for testing).
    pub fn default_dir_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".formation-admin").join("storage")
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a key, distinguishing "absent" from "present but unreadable".
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AdminError::StorageRead {
                key: key.to_string(),
                source,
            }),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "treating unreadable storage entry as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write_err = |source| AdminError::StorageWrite {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write to a temp file then rename for atomicity.
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::debug!(key, "storage entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AdminError::StorageWrite {
                key: key.to_string(),
                source,
            }),
        }
    }
}

// ── MemoryStore ────────────────────────────────────────────────────────────────

/// In-process store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
