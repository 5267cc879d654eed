//! `drift modified`: list files flagged as modified.

use crate::DriftContext;
use crate::detector::ChangeDetector;
use crate::output;
use anyhow::Result;

/// Prints every tracked path currently flagged as modified, one per line.
///
/// # Errors
/// Returns an error if the store cannot be loaded.
pub fn execute(ctx: &DriftContext) -> Result<()> {
    let detector = ChangeDetector::open(ctx)?;

    let modified = detector.modified_files();
    if modified.is_empty() {
        output::info("No modified files");
        return Ok(());
    }

    for path in modified {
        println!("{}", path.display());
    }

    Ok(())
}
