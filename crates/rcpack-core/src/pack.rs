//! The pack pipeline: paths in, Markdown document out.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use rcpack_config::AppConfig;
use tracing::{debug, info, warn};

use crate::compress::{self, CompressOptions};
use crate::format::{OutputFormatter, PackedFile};
use crate::git::{GitInfo, GitInfoCollector};
use crate::paths::{find_repo_root, normalize};
use crate::reader::{FileContent, FileReader, ReadError};
use crate::scan::RepositoryScanner;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Errors that abort a pack run.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("no valid paths were provided")]
    NoValidPaths,

    #[error("cannot open output file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Everything gathered for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRepository {
    /// Directory whose structure is shown.
    pub root: PathBuf,
    pub git: GitInfo,
    pub files: Vec<PackedFile>,
    /// Inputs and files that could not be used.
    pub skipped: Vec<PathBuf>,
}

impl PackedRepository {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.content.lines).sum()
    }
}

/// Runs the pipeline with a resolved configuration.
#[derive(Debug, Clone)]
pub struct Packer {
    config: AppConfig,
}

impl Packer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Scan, read and compress the files under `paths`.
    ///
    /// Relative paths resolve against `cwd`. Missing paths are warned about
    /// and dropped; the run fails only when none remain.
    pub async fn collect(
        &self,
        paths: &[PathBuf],
        recent: bool,
        cwd: &Path,
    ) -> Result<PackedRepository, PackError> {
        let mut inputs = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for raw in paths {
            let path = normalize(raw, cwd);
            if path.exists() {
                inputs.push(path);
            } else {
                warn!(path = %raw.display(), resolved = %path.display(), "Path does not exist");
                skipped.push(path);
            }
        }
        let first = inputs.first().ok_or(PackError::NoValidPaths)?;

        let root = if first.is_dir() {
            first.clone()
        } else {
            first.parent().map_or_else(|| first.clone(), Path::to_path_buf)
        };

        let repo_root = find_repo_root(&root);
        match &repo_root {
            Some(repo) => info!(path = %repo.display(), "Git repository root detected"),
            None => info!(path = %root.display(), "No .git found upwards, git info omitted"),
        }

        let scanner = RepositoryScanner::from_config(&self.config.scan);
        let mut scan = scanner.scan_paths(&inputs);
        if recent {
            let window = Duration::from_secs(self.config.scan.recent_days * SECONDS_PER_DAY);
            scan.retain_recent(window, SystemTime::now());
        }
        skipped.append(&mut scan.skipped);

        let reader = FileReader::from_config(&self.config.read);
        let engine = self
            .config
            .compress
            .any()
            .then(|| CompressOptions::from(&self.config.compress));
        let mut files = Vec::with_capacity(scan.files.len());
        for entry in scan.files {
            if self.config.output.dirs_only {
                files.push(PackedFile {
                    path: entry.path,
                    content: FileContent::default(),
                });
                continue;
            }
            match reader.read_file(&entry.path).await {
                Ok(content) => files.push(PackedFile {
                    content: match engine {
                        Some(options) => apply_engine(&entry.path, content, options),
                        None => content,
                    },
                    path: entry.path,
                }),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable file");
                    skipped.push(entry.path);
                }
            }
        }

        let git = GitInfoCollector::new(repo_root.as_deref().unwrap_or(&root))
            .collect()
            .await;

        debug!(files = files.len(), skipped = skipped.len(), "Collection finished");
        Ok(PackedRepository {
            root,
            git,
            files,
            skipped,
        })
    }

    /// Render `repo` as Markdown into `out`.
    pub fn write_document<W: Write>(&self, repo: &PackedRepository, out: W) -> io::Result<()> {
        OutputFormatter::new(out).generate(
            &repo.root,
            &repo.git,
            &repo.files,
            self.config.output.dirs_only,
        )
    }

    /// Collect and write to `output.path` (relative to `cwd`) or stdout.
    pub async fn run(
        &self,
        paths: &[PathBuf],
        recent: bool,
        cwd: &Path,
    ) -> Result<PackedRepository, PackError> {
        let repo = self.collect(paths, recent, cwd).await?;

        match &self.config.output.path {
            Some(target) => {
                let path = normalize(Path::new(target), cwd);
                let file = File::create(&path).map_err(|source| PackError::OutputOpen {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = BufWriter::new(file);
                self.write_document(&repo, &mut writer)?;
                writer.flush()?;
                info!(path = %path.display(), files = repo.files.len(), "Context written");
            }
            None => {
                let stdout = io::stdout();
                self.write_document(&repo, stdout.lock())?;
            }
        }

        Ok(repo)
    }
}

/// Compress a single file with the given engine passes.
pub async fn compress_file(
    path: &Path,
    reader: &FileReader,
    options: CompressOptions,
) -> Result<String, PackError> {
    let content = reader.read_file(path).await?;
    Ok(compress::process(&content.content, &extension_of(path), options))
}

/// Lowercase extension without the dot, or empty.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn apply_engine(path: &Path, content: FileContent, options: CompressOptions) -> FileContent {
    let processed = compress::process(&content.content, &extension_of(path), options);
    FileContent {
        lines: processed.bytes().filter(|&b| b == b'\n').count(),
        content: processed,
        truncated: content.truncated,
    }
}
