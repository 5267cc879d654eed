//! `drift check`: detect drift against the recorded baseline.

use crate::detector::ChangeDetector;
use crate::{DriftContext, output};
use anyhow::Result;
use std::path::Path;

/// Detects drift for one path, or for every tracked file.
///
/// Returns whether any drift was found so the binary can exit non-zero for
/// scripting.
///
/// # Errors
/// Returns an error if hashing an existing file fails or the store cannot be
/// loaded or saved.
pub fn execute(ctx: &DriftContext, path: Option<&str>) -> Result<bool> {
    let mut detector = ChangeDetector::open(ctx)?;

    let changed = detector.detect(path.map(Path::new))?;

    if changed {
        output::warning("Drift detected:");
        for file in detector.modified_files() {
            println!("  {}", file.display());
        }
    } else {
        output::success("No drift detected");
    }

    Ok(changed)
}
