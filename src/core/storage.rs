//! Key-value document storage backed by a plain directory.
//!
//! Each logical key `k` is one JSON document at `<data-dir>/<k>.json`.
//! Writes are synchronous and whole-document: callers re-serialize the full
//! value on every mutation, so the file on disk always matches memory once a
//! mutator returns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;

/// Directory-backed key-value store.
///
/// Keys map to files; values are opaque strings (JSON by convention).
/// Reads fail soft: a missing or unreadable file is `None`, never an error.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open (and create, if needed) the storage directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the value stored under `key`. Missing or unreadable keys are `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read storage key '{}': {}", key, e);
                None
            }
        }
    }

    /// Write `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)
            .with_context(|| format!("Failed to write storage key '{}'", key))
    }

    /// Delete the value stored under `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("Failed to remove storage key '{}': {}", key, e);
            }
        }
    }

    /// Check whether `key` currently has a stored value.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
