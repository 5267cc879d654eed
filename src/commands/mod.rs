//! CLI command implementations.
//!
//! Each submodule is one subcommand with an `execute(ctx, …)` entry point.
//! Commands are thin: they open a [`crate::detector::ChangeDetector`] (or the
//! backup helper), call the library operation, and print results through
//! [`crate::output`].

/// Back up files before they are overwritten.
pub mod backup;

/// Record baseline hashes.
pub mod baseline;

/// Detect drift against the baseline.
pub mod check;

/// List files flagged as modified.
pub mod modified;

/// Summarize the store's drift state.
pub mod report;
