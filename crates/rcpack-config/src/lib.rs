#![deny(unsafe_code)]

//! Configuration loading and validation for rcpack.
//!
//! Loads `rcpack.toml` and validates it. [`AppConfig`] is the central
//! configuration structure; command-line flags are layered on top of it by
//! the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rcpack.toml";

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which files are collected.
    #[serde(default)]
    pub scan: ScanConfig,

    /// How file contents are read.
    #[serde(default)]
    pub read: ReadConfig,

    /// Compression engine passes.
    #[serde(default)]
    pub compress: CompressConfig,

    /// Output destination and shape.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Extension filters such as `"*.rs"`, `".py"` or `"md"`. Empty means
    /// every file.
    #[serde(default)]
    pub include: Vec<String>,

    /// Case-insensitive regexes matched against the forward-slash path.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory names never descended into.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Window used by `--recent`, in days.
    #[serde(default = "default_recent_days")]
    pub recent_days: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            skip_dirs: default_skip_dirs(),
            recent_days: default_recent_days(),
        }
    }
}

fn default_skip_dirs() -> Vec<String> {
    [".git", "target", "node_modules"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_recent_days() -> u64 {
    7
}

/// File reading limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadConfig {
    /// Files larger than this are truncated to their first `max_file_bytes`.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    16 * 1024 // 16 KiB
}

/// Compression engine passes. All off by default.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressConfig {
    /// Replace file bodies with their signature digest.
    #[serde(default)]
    pub enabled: bool,

    /// Strip `//` and `/* */` comments.
    #[serde(default)]
    pub remove_comments: bool,

    /// Drop whitespace-only lines.
    #[serde(default)]
    pub remove_empty_lines: bool,
}

impl CompressConfig {
    /// Whether any engine pass is turned on.
    pub fn any(&self) -> bool {
        self.enabled || self.remove_comments || self.remove_empty_lines
    }
}

/// Output configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Only print the structure, skipping file contents.
    #[serde(default)]
    pub dirs_only: bool,

    /// Write to this file instead of stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match tokio::fs::try_exists(path).await {
            Ok(true) => Self::load(path).await,
            Ok(false) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read.max_file_bytes == 0 {
            return Err(ConfigError::Validation(
                "read.max_file_bytes must be non-zero".to_string(),
            ));
        }
        if self.scan.recent_days == 0 {
            return Err(ConfigError::Validation(
                "scan.recent_days must be at least 1".to_string(),
            ));
        }

        for (i, dir) in self.scan.skip_dirs.iter().enumerate() {
            if dir.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "scan.skip_dirs[{i}] must not be empty"
                )));
            }
            if dir.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "scan.skip_dirs[{i}] must be a directory name, got {dir:?}"
                )));
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                valid_levels, self.logging.level
            )));
        }

        if let Some(path) = &self.output.path
            && path.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "output.path must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}
