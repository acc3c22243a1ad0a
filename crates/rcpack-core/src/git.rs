//! Git metadata for the packed repository, gathered by shelling out to `git`.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::paths::find_repo_root;

/// HEAD metadata of a repository. All fields are empty outside a repository
/// or when `git` is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub is_repo: bool,
    pub commit: String,
    pub branch: String,
    /// `Name <email>` of the last commit's author.
    pub author: String,
    pub date: String,
}

/// Collects [`GitInfo`] for the repository containing a starting path.
#[derive(Debug, Clone)]
pub struct GitInfoCollector {
    start: PathBuf,
}

impl GitInfoCollector {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }

    /// Locate the enclosing repository and query its HEAD.
    pub async fn collect(&self) -> GitInfo {
        let Some(root) = find_repo_root(&self.start) else {
            debug!(path = %self.start.display(), "No git repository found");
            return GitInfo::default();
        };

        let commit = run_git(&root, &["rev-parse", "HEAD"]).await;
        let branch = run_git(&root, &["rev-parse", "--abbrev-ref", "HEAD"]).await;
        let log = run_git(&root, &["log", "-1", "--pretty=format:%an <%ae>|%ad"]).await;
        let (author, date) = split_author_date(&log);

        GitInfo {
            is_repo: true,
            commit,
            branch,
            author,
            date,
        }
    }
}

/// Split `author|date` output. Without a `|` the whole text is the author.
fn split_author_date(log: &str) -> (String, String) {
    match log.split_once('|') {
        Some((author, date)) => (author.to_string(), date.to_string()),
        None => (log.to_string(), String::new()),
    }
}

/// Run `git <args>` inside `dir` and return stdout without trailing line
/// breaks. Any failure yields an empty string.
async fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(std::process::Stdio::null())
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .trim_end_matches(['\n', '\r'])
            .to_string(),
        Ok(out) => {
            debug!(?args, status = %out.status, "git command failed");
            String::new()
        }
        Err(e) => {
            warn!(error = %e, "Failed to run git");
            String::new()
        }
    }
}
