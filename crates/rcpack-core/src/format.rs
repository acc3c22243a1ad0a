//! Markdown rendering of a packed repository.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::git::GitInfo;
use crate::paths::{display_relative, generic_string};
use crate::reader::FileContent;

/// Appended after the content of a file that was cut at the size limit.
pub const TRUNCATION_MARKER: &str = "...(truncated)";

const FENCE: &str = "```";

/// One file ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFile {
    pub path: PathBuf,
    pub content: FileContent,
}

/// Writes the Markdown document: location, git info, tree, file contents and
/// a summary.
pub struct OutputFormatter<W: Write> {
    out: W,
}

impl<W: Write> OutputFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render the whole document. `root` is the directory whose structure is
    /// shown; file paths are printed relative to it.
    pub fn generate(
        &mut self,
        root: &Path,
        git: &GitInfo,
        files: &[PackedFile],
        dirs_only: bool,
    ) -> io::Result<()> {
        writeln!(self.out, "# Repository Context\n")?;
        writeln!(self.out, "## File System Location\n")?;
        writeln!(self.out, "{}\n", generic_string(root))?;

        writeln!(self.out, "## Git Info\n")?;
        if git.is_repo {
            writeln!(self.out, "- Commit: {}", git.commit)?;
            writeln!(self.out, "- Branch: {}", git.branch)?;
            writeln!(self.out, "- Author: {}", git.author)?;
            writeln!(self.out, "- Date: {}\n", git.date)?;
        } else {
            writeln!(self.out, "Not a git repository\n")?;
        }

        writeln!(self.out, "## Structure")?;
        self.write_tree(root, files)?;

        writeln!(self.out, "\n## File Contents\n")?;
        if dirs_only {
            writeln!(self.out, "(skipped: directory-only mode)\n")?;
        } else {
            for file in files {
                self.write_file(root, file)?;
            }
        }

        let total_lines: usize = files.iter().map(|f| f.content.lines).sum();
        writeln!(self.out, "## Summary")?;
        writeln!(self.out, "- Total files: {}", files.len())?;
        writeln!(self.out, "- Total lines: {total_lines}")?;
        self.out.flush()
    }

    /// Files directly under `root` first, then each directory followed by
    /// its files indented by one space.
    fn write_tree(&mut self, root: &Path, files: &[PackedFile]) -> io::Result<()> {
        let mut top_level: Vec<String> = Vec::new();
        let mut dirs: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for file in files {
            let rel = display_relative(&file.path, root);
            match rel.rsplit_once('/') {
                Some((parent, name)) if !parent.is_empty() => {
                    dirs.entry(parent.to_string())
                        .or_default()
                        .push(name.to_string());
                }
                _ => top_level.push(rel),
            }
        }

        writeln!(self.out, "{FENCE}")?;
        for name in &top_level {
            writeln!(self.out, "{name}")?;
        }
        for (dir, names) in &dirs {
            writeln!(self.out, "{dir}/")?;
            for name in names {
                writeln!(self.out, " {name}")?;
            }
        }
        writeln!(self.out, "{FENCE}")
    }

    fn write_file(&mut self, root: &Path, file: &PackedFile) -> io::Result<()> {
        writeln!(self.out, "### File: {}", display_relative(&file.path, root))?;
        writeln!(self.out, "{FENCE}")?;
        self.out.write_all(file.content.content.as_bytes())?;
        if file.content.truncated {
            write!(self.out, "\n{TRUNCATION_MARKER}\n")?;
        }
        writeln!(self.out, "{FENCE}\n")
    }
}
