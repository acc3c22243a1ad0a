//! File reader with a size cap.

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

/// Errors raised while reading a file for packing.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Text of one file as it will be packed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    pub content: String,
    /// Line count of `content`.
    pub lines: usize,
    /// Whether only the first `max_bytes` of the file were read.
    pub truncated: bool,
}

/// Reads files into [`FileContent`], truncating anything over `max_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReader {
    max_bytes: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BYTES)
    }
}

impl FileReader {
    pub const DEFAULT_MAX_BYTES: u64 = 16 * 1024;

    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn from_config(config: &rcpack_config::ReadConfig) -> Self {
        Self::new(config.max_file_bytes)
    }

    /// Read `path`. Invalid UTF-8 is replaced rather than rejected.
    ///
    /// A truncated read keeps the raw bytes and counts their newlines. A full
    /// read ends every line, including the last, with `\n`.
    pub async fn read_file(&self, path: &Path) -> Result<FileContent, ReadError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| ReadError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let size = file.metadata().await.map(|m| m.len()).ok();
        let truncated = size.is_some_and(|len| len > self.max_bytes);
        let limit = if truncated { self.max_bytes } else { u64::MAX };

        let mut buf = Vec::new();
        file.take(limit)
            .read_to_end(&mut buf)
            .await
            .map_err(|source| ReadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let text = String::from_utf8_lossy(&buf);

        if truncated {
            tracing::debug!(path = %path.display(), limit = self.max_bytes, "File truncated");
            return Ok(FileContent {
                lines: text.bytes().filter(|&b| b == b'\n').count(),
                content: text.into_owned(),
                truncated: true,
            });
        }

        let mut content = String::with_capacity(text.len() + 1);
        let mut lines = 0;
        for line in text.split_terminator('\n') {
            content.push_str(line);
            content.push('\n');
            lines += 1;
        }
        Ok(FileContent {
            content,
            lines,
            truncated: false,
        })
    }
}
