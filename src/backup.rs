//! Timestamped file backups.
//!
//! Safety net for callers about to overwrite a drifted file: the current
//! content is copied into the backup directory under a timestamped name
//! before regeneration touches it.

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Copies `path` into `backup_dir` as `<file_name>.<YYYYMMDD_HHMMSS>.bak`.
///
/// The backup directory is created if absent. `std::fs::copy` carries file
/// permissions over where the platform supports it. A requested backup is
/// never silently dropped: an unreadable source or an uncreatable backup
/// directory is a hard error.
///
/// # Errors
/// Returns an error if the source file does not exist, the backup directory
/// cannot be created, or the copy fails.
pub fn backup_file(path: &Path, backup_dir: &Path) -> Result<PathBuf> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    std::fs::create_dir_all(backup_dir).with_context(|| {
        format!("Failed to create backup directory: {}", backup_dir.display())
    })?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Path has no file name: {}", path.display()))?
        .to_string_lossy();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = backup_dir.join(format!("{file_name}.{timestamp}.bak"));

    std::fs::copy(path, &backup_path).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            path.display(),
            backup_path.display()
        )
    })?;

    info!(source = %path.display(), backup = %backup_path.display(), "file backed up");

    Ok(backup_path)
}
