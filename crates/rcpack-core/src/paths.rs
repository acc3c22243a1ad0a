//! Path helpers: lexical normalization, repository root discovery and
//! display forms.

use std::path::{Component, Path, PathBuf};

/// Make `raw` absolute against `cwd` and resolve `.` and `..` lexically,
/// without touching the filesystem.
pub fn normalize(raw: &Path, cwd: &Path) -> PathBuf {
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Walk upward from `start` (or its parent, for a file) to the first
/// directory containing a `.git` entry.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Path as a string with `/` separators on every platform.
pub fn generic_string(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// `path` relative to `root` in forward-slash form, or the full path when it
/// lies outside `root`.
pub fn display_relative(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => generic_string(rel),
        _ => generic_string(path),
    }
}
