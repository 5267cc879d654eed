//! Persistent hash store.
//!
//! The store is a single JSON document mapping tracked file paths to their
//! recorded digest and drift state. The whole document is rewritten on every
//! save; tracked file counts are small (a project's generated-file set), so
//! partial updates are not worth the complexity. Single-process, single-writer
//! usage is assumed; concurrent writers must coordinate externally.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Format version of the store document itself.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// One entry per tracked file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashRecord {
    /// Algorithm-tagged content digest (`sha256:<hex>`). Never empty.
    pub hash: String,

    /// True once drift has been detected and not yet re-baselined.
    pub modified: bool,

    /// Updated every time the file is hashed or compared.
    pub last_checked: DateTime<Utc>,
}

impl HashRecord {
    /// A fresh baseline record for a just-computed digest.
    #[must_use]
    pub fn baseline(hash: String) -> Self {
        Self {
            hash,
            modified: false,
            last_checked: Utc::now(),
        }
    }
}

/// The persisted mapping from path to [`HashRecord`], plus store metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashStore {
    /// Format version of this document.
    pub schema_version: String,

    /// Caller-supplied version tag of the generator that produced the files.
    pub template_version: String,

    /// Timestamp of first creation.
    pub generated_at: DateTime<Utc>,

    /// Tracked files keyed by path. Key order is irrelevant.
    pub files: HashMap<PathBuf, HashRecord>,
}

impl HashStore {
    /// Creates an empty store stamped with the current time.
    #[must_use]
    pub fn new(template_version: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            template_version: template_version.to_string(),
            generated_at: Utc::now(),
            files: HashMap::new(),
        }
    }

    /// Loads a store from disk.
    ///
    /// A missing backing file is not an error: it yields a fresh empty store.
    /// An unparsable document is recovered the same way, with a warning;
    /// corruption never takes the tool down. Genuine I/O failures (permission
    /// denied and the like) propagate.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path, template_version: &str) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "store file absent, starting empty");
            return Ok(Self::new(template_version));
        }

        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read hash store: {}", path.display()))?;

        match serde_json::from_slice(&data) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable hash store, starting empty");
                Ok(Self::new(template_version))
            }
        }
    }

    /// Saves the store, rewriting the whole document.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// document cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let data = serde_json::to_vec_pretty(self).context("Failed to serialize hash store")?;

        std::fs::write(path, &data)
            .with_context(|| format!("Failed to write hash store: {}", path.display()))?;

        debug!(path = %path.display(), files = self.files.len(), "store saved");
        Ok(())
    }

    /// Record for a tracked path, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&HashRecord> {
        self.files.get(path)
    }

    /// Inserts or replaces the record for a path.
    pub fn put(&mut self, path: PathBuf, record: HashRecord) {
        self.files.insert(path, record);
    }

    /// Removes a path from tracking, returning its record if it existed.
    pub fn remove(&mut self, path: &Path) -> Option<HashRecord> {
        self.files.remove(path)
    }

    /// All tracked paths.
    #[must_use]
    pub fn all_paths(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    /// Whether a path is tracked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Number of tracked files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store tracks no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
