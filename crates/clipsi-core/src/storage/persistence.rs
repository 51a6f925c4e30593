//! JSON store persistence
//!
//! The whole store is one JSON array of categories kept in a single file.
//! Every save rewrites the file with an atomic write (write to temp file,
//! then rename) so it is never left half-written.
//!
//! Storage location: `~/.local/share/clipsi/` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::models::{generate_id, Category, Link};

use super::error::{StorageError, StorageResult};

/// Persistence layer for the category list
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the store file named by `config`
    pub fn new(config: &Config) -> Self {
        Self::at(config.store_path())
    }

    /// Create a persistence handler for an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path where an unreadable store is copied before being discarded
    pub fn backup_path(&self) -> PathBuf {
        self.numbered_backup_path(0)
    }

    /// `{file}.corrupt.backup`, then `{file}.corrupt.backup.1`, `.2`, ...
    fn numbered_backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt.backup");
        if n > 0 {
            name.push(format!(".{}", n));
        }
        PathBuf::from(name)
    }

    /// Check if a store file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the category list
    ///
    /// A missing file yields an empty list. A file that is not valid JSON is
    /// copied aside (see [`backup_path`](Self::backup_path)), logged, and
    /// treated as empty. Other read failures are returned.
    ///
    /// Links stored without a name fall back to their URL, and links stored
    /// without an id get a fresh one, counted in [`Loaded::assigned_ids`] so
    /// the caller can write the ids back.
    pub fn load(&self) -> StorageResult<Loaded> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store at {:?}, starting empty", self.path);
                return Ok(Loaded::default());
            }
            Err(e) => return Err(StorageError::from_read(e, self.path.clone())),
        };

        match serde_json::from_slice::<Vec<StoredCategory>>(&raw) {
            Ok(stored) => {
                let mut assigned_ids = 0;
                let categories: Vec<Category> = stored
                    .into_iter()
                    .map(|c| c.into_category(&mut assigned_ids))
                    .collect();
                debug!(
                    "Loaded {} categories from {:?}",
                    categories.len(),
                    self.path
                );
                Ok(Loaded {
                    categories,
                    assigned_ids,
                })
            }
            Err(e) => {
                error!("Failed to parse store {:?}: {}", self.path, e);
                match self.preserve_unreadable(&raw) {
                    Ok(Some(backup)) => warn!("Unreadable store preserved at {:?}", backup),
                    Ok(None) => debug!("Unreadable store was already preserved"),
                    Err(e) => error!("Could not back up unreadable store: {}", e),
                }
                Ok(Loaded::default())
            }
        }
    }

    /// Copy an unreadable payload next to the store
    ///
    /// Earlier backups are never overwritten: the payload goes to the first
    /// free numbered path, unless an existing backup already holds the same
    /// bytes (returns `None`).
    fn preserve_unreadable(&self, raw: &[u8]) -> StorageResult<Option<PathBuf>> {
        let mut n = 0;
        loop {
            let candidate = self.numbered_backup_path(n);
            match fs::read(&candidate) {
                Ok(existing) if existing == raw => return Ok(None),
                Ok(_) => n += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    atomic_write(&candidate, raw)?;
                    return Ok(Some(candidate));
                }
                Err(e) => return Err(StorageError::from_read(e, candidate)),
            }
        }
    }

    /// Serialize the whole category list and overwrite the store file
    pub fn save(&self, categories: &[Category]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(categories).map_err(StorageError::Serialize)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} categories to {:?}", categories.len(), self.path);
        Ok(())
    }

    /// Delete the store file
    ///
    /// Succeeds if the file does not exist.
    pub fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, self.path.clone())),
        }
    }
}

/// Categories read from disk
#[derive(Debug, Default)]
pub struct Loaded {
    pub categories: Vec<Category>,
    /// Links that had no stored id and were given one during this load
    pub assigned_ids: usize,
}

/// A category as stored, tolerating fields older documents leave out
#[derive(Deserialize)]
struct StoredCategory {
    name: String,
    #[serde(default)]
    links: Option<Vec<StoredLink>>,
}

#[derive(Deserialize)]
struct StoredLink {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    url: String,
    #[serde(default)]
    desc: Option<String>,
}

impl StoredCategory {
    fn into_category(self, assigned_ids: &mut usize) -> Category {
        Category {
            name: self.name,
            links: self
                .links
                .unwrap_or_default()
                .into_iter()
                .map(|l| l.into_link(assigned_ids))
                .collect(),
        }
    }
}

impl StoredLink {
    fn into_link(self, assigned_ids: &mut usize) -> Link {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                *assigned_ids += 1;
                generate_id()
            }
        };
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.url.clone(),
        };
        Link::with_id(id, name, self.url, self.desc.unwrap_or_default())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
