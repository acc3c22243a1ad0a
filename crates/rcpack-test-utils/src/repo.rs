//! Temporary repository fixtures.
//!
//! [`TestRepo`] owns a temp directory that is deleted when the value is
//! dropped, guaranteeing cleanup even on panic.

use std::path::{Path, PathBuf};

use rcpack_config::AppConfig;
use tempfile::TempDir;

/// A throwaway directory tree to scan and pack.
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// Create an empty directory (no `.git`).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a directory carrying an empty `.git` marker, enough for root
    /// discovery to treat it as a repository.
    pub fn with_git_marker() -> Self {
        let repo = Self::new();
        std::fs::create_dir(repo.path().join(".git")).expect("failed to create .git marker");
        repo
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the repository.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories as needed.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Write `rcpack.toml` with the given content and load it.
    pub async fn load_config(&self, toml_content: &str) -> AppConfig {
        let config_path = self.join(rcpack_config::DEFAULT_CONFIG_FILE);
        tokio::fs::write(&config_path, toml_content)
            .await
            .expect("failed to write test config");
        AppConfig::load(&config_path)
            .await
            .expect("failed to parse test config")
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
