//! On-disk cache of the metadata index
//!
//! A single msgpack blob holding an [`IndexSnapshot`]. Building the index
//! means booting the runtime model, which is slow, so the blob is reused
//! across sessions until the running system's version changes.

use crate::error::Result;
use crate::index::source::UNKNOWN_VERSION;
use crate::index::{CURRENT_FORMAT_VERSION, IndexSnapshot};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_FILE_NAME: &str = "completions.mpk";

pub struct IndexCache {
    path: PathBuf,
    /// Running system version; `None` accepts whatever version is stored.
    version: Option<String>,
}

impl IndexCache {
    /// A cache at `path` valid for system `version`.
    pub fn new(path: PathBuf, version: impl Into<String>) -> Self {
        Self {
            path,
            version: Some(version.into()),
        }
    }

    /// A cache at `path` for a system whose version is not known. Any stored
    /// blob of the current format is taken as is.
    pub fn unversioned(path: PathBuf) -> Self {
        Self {
            path,
            version: None,
        }
    }

    /// A cache file inside `datadir`.
    pub fn in_dir(datadir: &Path, version: impl Into<String>) -> Self {
        Self::new(datadir.join(CACHE_FILE_NAME), version)
    }

    /// Get the default cache location
    pub fn default_location() -> PathBuf {
        crate::home_dir().join(CACHE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the blob as stored, whatever its version.
    ///
    /// A missing or empty file is `Ok(None)`; a file that does not decode is an error.
    pub fn read(&self) -> Result<Option<IndexSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(rmp_serde::from_slice::<IndexSnapshot>(&bytes)?))
    }

    /// Loads a snapshot usable by the running system, or `None` on any kind of miss.
    pub fn load(&self) -> Option<IndexSnapshot> {
        let snapshot = match self.read() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!("No completion cache at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read completion cache at {}: {}. Will rebuild.",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        if snapshot.format_version != CURRENT_FORMAT_VERSION {
            tracing::info!(
                "Completion cache format mismatch at {} (found {}, expected {}). Will rebuild.",
                self.path.display(),
                snapshot.format_version,
                CURRENT_FORMAT_VERSION
            );
            return None;
        }

        match &self.version {
            Some(version) if *version != snapshot.version => {
                tracing::info!(
                    "Updating completion cache from {} to {}",
                    snapshot.version,
                    version
                );
                return None;
            }
            Some(_) => {}
            None => tracing::info!(
                "System version unknown, using completion cache built for {}",
                snapshot.version
            ),
        }

        tracing::info!("Loaded completion cache from {}", self.path.display());
        Some(snapshot)
    }

    /// Persists `snapshot`, writing to a temporary file first and renaming it over the cache.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = rmp_serde::to_vec_named(snapshot)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(temp_path, &self.path)?;

        tracing::info!("Saved completion cache to {}", self.path.display());
        Ok(())
    }

    /// Returns the cached snapshot when it matches the running version;
    /// otherwise calls `build` with that version (`unknown` when there is
    /// none) and persists the result.
    pub fn load_or_build<F>(&self, build: F) -> Result<IndexSnapshot>
    where
        F: FnOnce(&str) -> Result<IndexSnapshot>,
    {
        if let Some(snapshot) = self.load() {
            return Ok(snapshot);
        }

        let version = self.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        let mut snapshot = build(version)?;
        snapshot.version = version.to_string();
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Removes the cache file. Returns whether there was one.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
