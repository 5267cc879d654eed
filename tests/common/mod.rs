use anyhow::Result;
use driftman::DriftContext;
use std::path::Path;
use tempfile::TempDir;

/// Test workspace fixture for consistent test setup
pub struct TestTree {
    pub temp_dir: TempDir,
    pub ctx: DriftContext,
}

impl TestTree {
    /// Create a temporary working tree with a default driftman config
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".config/driftman/config");

        let ctx = DriftContext::new_explicit(temp_dir.path().to_path_buf(), config_path)?;

        Ok(Self { temp_dir, ctx })
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the tree root
    pub fn write(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new().expect("Failed to create test tree")
    }
}
