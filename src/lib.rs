#![warn(missing_docs)]

//! # Driftman - Hash-Based Change Tracking
//!
//! Driftman records a content-hash baseline for a set of generated files and
//! later detects which of them have drifted from that baseline. It is meant
//! for tool generators that scaffold files into a project and need to know,
//! before regenerating, which files the user has customized.
//!
//! ## Features
//!
//! - **Content-Addressed Baselines**: Files are digested with SHA-256 and the
//!   algorithm-tagged digest (`sha256:<hex>`) is recorded in a JSON store
//! - **Drift Detection**: Per-file or whole-store comparison against the
//!   recorded baseline, with a sticky `modified` flag cleared only by
//!   re-baselining
//! - **Backups**: Timestamped copies of drifted files before they are
//!   overwritten
//! - **Reports**: Human-readable and JSON summaries of tracked vs drifted
//!   files
//!
//! ## Architecture
//!
//! - [`commands`]: CLI command implementations (baseline, check, report, etc.)
//! - [`store`]: The persistent hash store (JSON document on disk)
//! - [`hash`]: Streaming SHA-256 digest computation
//! - [`detector`]: Baseline generation and drift detection
//! - [`backup`]: Timestamped file backups
//! - [`config`]: Configuration parsing and defaults
//! - [`output`]: Output formatting and verbosity control
//!
//! ## Example Usage
//!
//! ```no_run
//! use driftman::DriftContext;
//! use driftman::detector::ChangeDetector;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = DriftContext::new()?;
//! let mut detector = ChangeDetector::open(&ctx)?;
//!
//! // Record a baseline for two generated files
//! detector.generate_baseline(Some(&["main.py".into(), "config.yaml".into()]))?;
//!
//! // Later: has anything been customized?
//! if detector.detect(Some(std::path::Path::new("main.py")))? {
//!     println!("main.py was customized");
//! }
//! # Ok(())
//! # }
//! ```

/// Timestamped file backups.
pub mod backup;

/// CLI command implementations.
pub mod commands;

/// Configuration parsing and defaults.
pub mod config;

/// Baseline generation and drift detection.
pub mod detector;

/// Streaming SHA-256 digest computation.
pub mod hash;

/// Output formatting and verbosity control.
pub mod output;

/// Persistent hash store.
pub mod store;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the driftman binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default name of the hash store document, relative to the working tree.
pub const DEFAULT_STORE_FILE: &str = ".file_hashes.json";

/// Default backup directory name, relative to the working tree.
pub const DEFAULT_BACKUP_DIR: &str = ".backups";

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/driftman/config";

/// Central context for all driftman operations.
///
/// Holds the working tree root, the configuration path, and the loaded
/// configuration. All store and backup paths are resolved through this
/// context so that commands and tests never reach for process-wide state.
#[derive(Debug, Clone)]
pub struct DriftContext {
    /// Root of the tracked working tree.
    pub work_dir: PathBuf,

    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl DriftContext {
    /// Creates a context rooted at the current directory, loading the
    /// configuration from the default path.
    ///
    /// `DRIFT_CONFIG_PATH` overrides the configuration file location and
    /// `DRIFT_WORK_DIR` overrides the working tree root, which keeps tests
    /// and scripted invocations free of `cd` gymnastics.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or the
    /// configuration cannot be read or created.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("DRIFT_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let work_dir = if let Ok(path) = std::env::var("DRIFT_WORK_DIR") {
            PathBuf::from(path)
        } else {
            std::env::current_dir().context("Could not determine current directory")?
        };

        let config = config::Config::load(&config_path)?;

        Ok(Self {
            work_dir,
            config_path,
            config,
        })
    }

    /// Creates a context with explicit paths, for tests and embedding.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(work_dir: PathBuf, config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            config::Config::load(&config_path)?
        } else {
            let config = config::Config::default();

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            config.save(&config_path)?;
            config
        };

        Ok(Self {
            work_dir,
            config_path,
            config,
        })
    }

    /// Absolute path of the hash store document.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.resolve(&self.config.core.store_file)
    }

    /// Absolute path of the backup directory.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.resolve(&self.config.core.backup_dir)
    }

    /// Resolves a possibly-relative path against the working tree root.
    #[must_use]
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_context_explicit_paths() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config");

        let ctx = DriftContext::new_explicit(dir.path().to_path_buf(), config_path.clone())?;

        assert!(config_path.exists());
        assert_eq!(ctx.store_path(), dir.path().join(DEFAULT_STORE_FILE));
        assert_eq!(ctx.backup_dir(), dir.path().join(DEFAULT_BACKUP_DIR));

        Ok(())
    }

    #[test]
    fn test_resolve_absolute_path_untouched() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DriftContext::new_explicit(dir.path().to_path_buf(), dir.path().join("config"))?;

        let abs = dir.path().join("elsewhere").join("store.json");
        assert_eq!(ctx.resolve(&abs), abs);

        Ok(())
    }
}
