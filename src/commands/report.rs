//! `drift report`: summarize the store's drift state.

use crate::DriftContext;
use crate::detector::ChangeDetector;
use anyhow::Result;
use colored::Colorize;

/// Prints a drift summary, either human-readable or as JSON.
///
/// # Errors
/// Returns an error if the store cannot be loaded or the report cannot be
/// serialized.
pub fn execute(ctx: &DriftContext, json: bool) -> Result<()> {
    let detector = ChangeDetector::open(ctx)?;
    let report = detector.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Drift report".bold());
    println!("  Template version: {}", report.template_version);
    println!("  Generated at:     {}", report.generated_at.to_rfc3339());
    println!("  Last check:       {}", report.last_check.to_rfc3339());
    println!("  Tracked files:    {}", report.total_files);

    if report.modified_count == 0 {
        println!("  Modified files:   {}", "none".green());
    } else {
        println!(
            "  Modified files:   {}",
            report.modified_count.to_string().yellow().bold()
        );
        for path in &report.modified_files {
            println!("    {}", path.display().to_string().yellow());
        }
    }

    Ok(())
}
