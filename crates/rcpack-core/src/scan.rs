//! Repository scanner: expands input paths into the list of files to pack.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::paths::generic_string;
use crate::patterns::normalize_extension_token;

/// A file selected for packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Size in bytes at scan time.
    pub size: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Outcome of a scan: selected files (sorted by path) and inputs that
/// could not be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub files: Vec<FileEntry>,
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    /// Keep only files modified within `window` before `now`. Files without
    /// a modification time are dropped.
    pub fn retain_recent(&mut self, window: Duration, now: SystemTime) {
        let before = self.files.len();
        self.files.retain(|f| {
            f.modified
                .is_some_and(|m| now.duration_since(m).map_or(true, |age| age <= window))
        });
        debug!(kept = self.files.len(), dropped = before - self.files.len(), "Recent filter applied");
    }
}

/// Selects files by extension and exclude regexes, walking directories.
#[derive(Debug, Clone, Default)]
pub struct RepositoryScanner {
    /// Lowercase `.ext` forms. Empty accepts every extension.
    extensions: Vec<String>,
    excludes: Vec<Regex>,
    skip_dirs: Vec<String>,
}

impl RepositoryScanner {
    /// Build a scanner. Include tokens that are not extensions and exclude
    /// patterns that fail to compile are warned about and ignored.
    pub fn new(include: &[String], exclude: &[String], skip_dirs: &[String]) -> Self {
        let extensions = include
            .iter()
            .filter_map(|token| {
                let ext = normalize_extension_token(token);
                if ext.is_none() {
                    warn!(pattern = %token, "Include pattern is not an extension form, ignoring");
                }
                ext
            })
            .collect();

        let excludes = exclude
            .iter()
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .filter_map(|raw| {
                RegexBuilder::new(raw)
                    .case_insensitive(true)
                    .build()
                    .inspect_err(|e| warn!(pattern = %raw, error = %e, "Invalid exclude regex, ignoring"))
                    .ok()
            })
            .collect();

        Self {
            extensions,
            excludes,
            skip_dirs: skip_dirs.to_vec(),
        }
    }

    pub fn from_config(config: &rcpack_config::ScanConfig) -> Self {
        Self::new(&config.include, &config.exclude, &config.skip_dirs)
    }

    /// Whether a file path passes the exclude and include filters.
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = generic_string(path);
        if self.excludes.iter().any(|re| re.is_match(&path_str)) {
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        self.extensions.contains(&ext)
    }

    /// Expand `paths` into matching files. Directories are walked
    /// recursively without following symlinked directories.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();

        for path in paths {
            match std::fs::metadata(path) {
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Path does not exist");
                    result.skipped.push(path.clone());
                }
                Ok(meta) if meta.is_file() => {
                    if self.matches(path) {
                        result.files.push(file_entry(path.clone(), &meta));
                    }
                }
                Ok(meta) if meta.is_dir() => self.walk_dir(path, &mut result),
                Ok(_) => {
                    warn!(path = %path.display(), "Skipping special file");
                    result.skipped.push(path.clone());
                }
            }
        }

        result
            .files
            .sort_by_cached_key(|f| generic_string(&f.path));
        debug!(files = result.files.len(), skipped = result.skipped.len(), "Scan finished");
        result
    }

    fn walk_dir(&self, dir: &Path, result: &mut ScanResult) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Cannot read directory");
                result.skipped.push(dir.to_path_buf());
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "Cannot read directory entry");
                    continue;
                }
            };
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                result.skipped.push(path);
                continue;
            };

            if file_type.is_dir() {
                let name = entry.file_name();
                if self.skip_dirs.iter().any(|s| name == s.as_str()) {
                    continue;
                }
                self.walk_dir(&path, result);
                continue;
            }

            // Symlinks count only when they point at a regular file.
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    if self.matches(&path) {
                        result.files.push(file_entry(path, &meta));
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot stat file");
                    result.skipped.push(path);
                }
            }
        }
    }
}

fn file_entry(path: PathBuf, meta: &std::fs::Metadata) -> FileEntry {
    FileEntry {
        path,
        size: meta.len(),
        modified: meta.modified().ok(),
    }
}
