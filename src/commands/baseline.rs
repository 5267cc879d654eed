//! `drift baseline`: record baseline hashes for files.

use crate::detector::ChangeDetector;
use crate::{DriftContext, output};
use anyhow::Result;
use std::path::PathBuf;

/// Records (or re-records) baseline hashes.
///
/// With no `paths`, the whole working tree is scanned. Re-recording a path
/// clears its modified flag.
///
/// # Errors
/// Returns an error if the store cannot be loaded or saved, or the working
/// tree cannot be scanned.
pub fn execute(ctx: &DriftContext, paths: &[String]) -> Result<()> {
    let mut detector = ChangeDetector::open(ctx)?;

    let targets: Option<Vec<PathBuf>> = if paths.is_empty() {
        None
    } else {
        Some(paths.iter().map(PathBuf::from).collect())
    };

    let summary = detector.generate_baseline(targets.as_deref())?;

    output::success(&format!(
        "Recorded {} file(s), skipped {}",
        summary.recorded, summary.skipped
    ));

    Ok(())
}
