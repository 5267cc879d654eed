//! Baseline generation and drift detection.
//!
//! A [`ChangeDetector`] owns a loaded [`HashStore`] and compares freshly
//! computed digests against the recorded baseline. Per tracked file the state
//! machine is: baseline stays baseline on a digest match, flips to modified on
//! a mismatch, and only re-baselining (`generate_baseline`) clears the flag;
//! detection alone never does.

use crate::store::{HashRecord, HashStore};
use crate::{DriftContext, hash};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome counts of a baseline batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineSummary {
    /// Files whose digest was recorded.
    pub recorded: usize,

    /// Files skipped because hashing them failed.
    pub skipped: usize,
}

/// Structured summary of the store's drift state.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    /// Number of tracked files.
    pub total_files: usize,

    /// Number of tracked files currently flagged as modified.
    pub modified_count: usize,

    /// Paths of the modified files, sorted.
    pub modified_files: Vec<PathBuf>,

    /// Template version recorded in the store.
    pub template_version: String,

    /// When the store was first created.
    pub generated_at: DateTime<Utc>,

    /// When this report was produced.
    pub last_check: DateTime<Utc>,
}

/// Compares current file digests against the recorded baseline.
pub struct ChangeDetector {
    work_dir: PathBuf,
    store_path: PathBuf,
    exclude_patterns: Vec<String>,
    follow_symlinks: bool,
    store: HashStore,
}

impl ChangeDetector {
    /// Opens the detector for a context, loading (or freshly creating) the
    /// hash store.
    ///
    /// # Errors
    /// Returns an error if the store file exists but cannot be read.
    pub fn open(ctx: &DriftContext) -> Result<Self> {
        let store_path = ctx.store_path();
        let store = HashStore::load(&store_path, &ctx.config.core.template_version)?;

        Ok(Self {
            work_dir: ctx.work_dir.clone(),
            store_path,
            exclude_patterns: ctx.config.tracking.exclude_patterns.clone(),
            follow_symlinks: ctx.config.tracking.follow_symlinks,
            store,
        })
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &HashStore {
        &self.store
    }

    /// Whether a path matches the exclusion list.
    ///
    /// `*.ext` patterns match on the file extension; every other pattern
    /// matches as a plain substring of the path. The substring rule is a
    /// loose heuristic inherited from the original tool and can catch
    /// unrelated paths that merely contain an excluded name.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Some(ext) = pattern.strip_prefix("*.") {
                if path.extension().is_some_and(|e| e == ext) {
                    return true;
                }
            } else if path_str.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }

    /// Records (or re-records) baseline digests.
    ///
    /// With `paths`, only those files are hashed; otherwise the whole working
    /// tree is scanned recursively. Excluded paths are dropped either way.
    /// A file that fails to hash is logged and skipped; one bad file never
    /// aborts the batch. Re-recording a path clears its `modified` flag.
    ///
    /// The store is saved once after the batch.
    ///
    /// # Errors
    /// Returns an error if the working tree cannot be scanned or the store
    /// cannot be saved.
    pub fn generate_baseline(&mut self, paths: Option<&[PathBuf]>) -> Result<BaselineSummary> {
        let targets: Vec<PathBuf> = match paths {
            Some(list) => list.to_vec(),
            None => self.scan_work_dir()?,
        };

        let targets: Vec<PathBuf> = targets
            .into_iter()
            .filter(|p| !self.should_exclude(p))
            .collect();

        info!(files = targets.len(), "generating baseline hashes");

        let mut summary = BaselineSummary {
            recorded: 0,
            skipped: 0,
        };

        for path in targets {
            match hash::digest_file(&self.resolve(&path)) {
                Ok(digest) => {
                    debug!(file = %path.display(), digest = %&digest[..23], "hash recorded");
                    self.store.put(path, HashRecord::baseline(digest));
                    summary.recorded += 1;
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failed to hash file, skipping");
                    summary.skipped += 1;
                }
            }
        }

        self.store.save(&self.store_path)?;

        info!(
            recorded = summary.recorded,
            skipped = summary.skipped,
            "baseline generation complete"
        );

        Ok(summary)
    }

    /// Detects drift for one path, or for every tracked path.
    ///
    /// Single-path mode: an untracked path yields `Ok(false)` with a warning.
    /// On a digest mismatch the record is flagged modified, its timestamp
    /// refreshed, and the store saved; a match writes nothing.
    ///
    /// Batch mode: tracked paths missing on disk are logged and skipped; a
    /// deleted file is a distinct condition from a modified one and is left
    /// unflagged. Returns true iff at least one file changed.
    ///
    /// # Errors
    /// Returns an error if hashing an existing file fails or the store cannot
    /// be saved.
    pub fn detect(&mut self, path: Option<&Path>) -> Result<bool> {
        match path {
            Some(p) => self.check_single(p),
            None => self.check_all(),
        }
    }

    /// Paths currently flagged as modified, sorted for stable output.
    #[must_use]
    pub fn modified_files(&self) -> Vec<PathBuf> {
        let mut modified: Vec<PathBuf> = self
            .store
            .files
            .iter()
            .filter(|(_, record)| record.modified)
            .map(|(path, _)| path.clone())
            .collect();
        modified.sort();
        modified
    }

    /// Produces a summary of the store's current drift state.
    #[must_use]
    pub fn report(&self) -> DriftReport {
        let modified_files = self.modified_files();

        DriftReport {
            total_files: self.store.len(),
            modified_count: modified_files.len(),
            modified_files,
            template_version: self.store.template_version.clone(),
            generated_at: self.store.generated_at,
            last_check: Utc::now(),
        }
    }

    fn check_single(&mut self, path: &Path) -> Result<bool> {
        if !self.store.contains(path) {
            warn!(file = %path.display(), "path is not tracked in the hash store");
            return Ok(false);
        }

        let current = hash::digest_file(&self.resolve(path))?;
        let (recorded, already_flagged) = {
            let record = self
                .store
                .get(path)
                .context("record vanished during detection")?;
            (record.hash.clone(), record.modified)
        };

        if current == recorded {
            return Ok(false);
        }

        self.store.put(
            path.to_path_buf(),
            HashRecord {
                hash: recorded,
                modified: true,
                last_checked: Utc::now(),
            },
        );
        self.store.save(&self.store_path)?;

        if already_flagged {
            debug!(file = %path.display(), "file still modified");
        } else {
            info!(file = %path.display(), "file modification detected");
        }

        Ok(true)
    }

    fn check_all(&mut self) -> Result<bool> {
        let mut tracked = self.store.all_paths();
        tracked.sort();

        let mut changed = Vec::new();
        let mut missing = 0usize;

        for path in tracked {
            if !self.resolve(&path).exists() {
                warn!(file = %path.display(), "tracked file no longer exists, skipping");
                missing += 1;
                continue;
            }

            if self.check_single(&path)? {
                changed.push(path);
            }
        }

        if !changed.is_empty() {
            info!(count = changed.len(), missing, "modified files detected");
        }

        Ok(!changed.is_empty())
    }

    /// Recursively lists files under the working tree, as paths relative to
    /// its root. Exclusions are applied by the caller.
    fn scan_work_dir(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.work_dir).follow_links(self.follow_symlinks) {
            let entry = entry.with_context(|| {
                format!("Failed to scan directory: {}", self.work_dir.display())
            })?;
            if entry.file_type().is_file() {
                let path = entry
                    .path()
                    .strip_prefix(&self.work_dir)
                    .map_or_else(|_| entry.path().to_path_buf(), Path::to_path_buf);
                paths.push(path);
            }
        }

        Ok(paths)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}
