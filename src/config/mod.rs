//! Configuration parsing and defaults.
//!
//! Driftman reads a small TOML configuration file, auto-created with default
//! values on first use. The `[core]` section locates the hash store and the
//! backup directory; `[tracking]` controls which paths are excluded from
//! baselines and whether symlinks are followed during scans.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Store and backup locations.
    #[serde(default)]
    pub core: CoreConfig,

    /// Exclusion and scan behavior.
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// Store and backup locations plus the caller-supplied template version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Hash store document, resolved against the working tree if relative.
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,

    /// Backup directory, resolved against the working tree if relative.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Version tag of the generator that produced the tracked files.
    #[serde(default = "default_template_version")]
    pub template_version: String,
}

/// Exclusion and scan behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Paths matching any of these patterns are never hashed or reported.
    /// `*.ext` entries match by extension, everything else by substring.
    pub exclude_patterns: Vec<String>,

    /// Whether recursive scans follow symlinks.
    pub follow_symlinks: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            backup_dir: default_backup_dir(),
            template_version: default_template_version(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![
                ".env".to_string(),
                "*.log".to_string(),
                ".git".to_string(),
                ".gitignore".to_string(),
                "__pycache__".to_string(),
                "*.pyc".to_string(),
                ".backups".to_string(),
                ".file_hashes.json".to_string(),
                "logs".to_string(),
            ],
            follow_symlinks: false,
        }
    }
}

fn default_store_file() -> PathBuf {
    PathBuf::from(crate::DEFAULT_STORE_FILE)
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(crate::DEFAULT_BACKUP_DIR)
}

fn default_template_version() -> String {
    "1.0.0".to_string()
}

impl Config {
    /// Load configuration from a file, creating it with defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }
}
