//! `drift backup`: copy files aside before overwriting them.

use crate::{DriftContext, backup, output};
use anyhow::Result;
use std::path::Path;

/// Backs up each path into the configured backup directory, printing the
/// backup location for every file.
///
/// # Errors
/// Returns an error on the first file that cannot be backed up; a requested
/// backup is never silently dropped.
pub fn execute(ctx: &DriftContext, paths: &[String]) -> Result<()> {
    let backup_dir = ctx.backup_dir();

    for path in paths {
        let source = ctx.resolve(Path::new(path));
        let backup_path = backup::backup_file(&source, &backup_dir)?;
        output::success(&format!("{path} -> {}", backup_path.display()));
    }

    Ok(())
}
