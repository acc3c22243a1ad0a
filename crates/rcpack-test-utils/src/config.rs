//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use rcpack_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .include(&["*.rs"])
///     .compress(true)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn include(mut self, patterns: &[&str]) -> Self {
        self.config.scan.include = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn exclude(mut self, patterns: &[&str]) -> Self {
        self.config.scan.exclude = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.config.scan.skip_dirs = dirs.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn recent_days(mut self, days: u64) -> Self {
        self.config.scan.recent_days = days;
        self
    }

    pub fn max_file_bytes(mut self, bytes: u64) -> Self {
        self.config.read.max_file_bytes = bytes;
        self
    }

    pub fn compress(mut self, enabled: bool) -> Self {
        self.config.compress.enabled = enabled;
        self
    }

    pub fn remove_comments(mut self, enabled: bool) -> Self {
        self.config.compress.remove_comments = enabled;
        self
    }

    pub fn remove_empty_lines(mut self, enabled: bool) -> Self {
        self.config.compress.remove_empty_lines = enabled;
        self
    }

    pub fn dirs_only(mut self, enabled: bool) -> Self {
        self.config.output.dirs_only = enabled;
        self
    }

    pub fn output_path(mut self, path: &str) -> Self {
        self.config.output.path = Some(path.to_string());
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
