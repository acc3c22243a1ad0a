//! Lexical compression engine.
//!
//! Turns one file's text into a digest of its constructs: each detected
//! signature is kept with the comments above it and a few of the comments
//! inside its body, while the body code itself is elided. Detection is
//! heuristic and line-local; every question of "is this inside a string or a
//! comment" is answered by the shared [`scanner`].
//!
//! The engine is infallible. Unbalanced braces, unterminated literals and
//! files without constructs all degrade to a smaller (or verbatim) digest.

use std::collections::HashSet;

use tracing::trace;

pub mod braces;
pub mod chunk;
pub mod comments;
pub mod fallback;
pub mod lines;
pub mod scanner;
pub mod signature;

pub use chunk::{Chunk, MAX_INNER_COMMENT_LINES};
pub use signature::LanguageFamily;

use braces::{find_matching_brace, find_opening_brace};
use comments::{interior_comments, preceding_comments, strip_comments};
use fallback::leading_comment_prologue;
use lines::split_lines;
use signature::{is_signature, normalize_signature};

/// Line placed between consecutive chunks of one file.
pub const CHUNK_SEPARATOR: &str = "\n⋮----\n";

/// Which passes [`process`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressOptions {
    /// Replace the text by its chunk digest.
    pub compress: bool,
    /// Strip `//` and `/* */` comments first (quote-aware).
    pub remove_comments: bool,
    /// Drop lines that are empty or whitespace-only.
    pub remove_empty_lines: bool,
}

impl From<&rcpack_config::CompressConfig> for CompressOptions {
    fn from(config: &rcpack_config::CompressConfig) -> Self {
        Self {
            compress: config.enabled,
            remove_comments: config.remove_comments,
            remove_empty_lines: config.remove_empty_lines,
        }
    }
}

/// Remembers the rendered chunks already emitted for one file.
///
/// Identity is the full rendered text, so two overloads that differ only in
/// their documentation are both kept.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    /// Returns `true` the first time `rendered` is offered.
    pub fn admit(&mut self, rendered: &str) -> bool {
        if self.seen.contains(rendered) {
            return false;
        }
        self.seen.insert(rendered.to_string())
    }
}

/// Extract the rendered chunks of `text`, in file order.
///
/// When no line looks like a signature, the file's leading comment prologue
/// (if any) becomes the only chunk.
pub fn extract_chunks(text: &str, family: LanguageFamily) -> Vec<String> {
    let lines = split_lines(text);
    let mut dedup = Deduplicator::default();
    let mut chunks = Vec::new();
    let mut matched = 0usize;

    for line in &lines {
        let trimmed = line.trimmed();
        if !is_signature(trimmed, family) {
            continue;
        }
        matched += 1;

        let body = find_opening_brace(text, line, family)
            .and_then(|open| find_matching_brace(text, open).map(|close| open..close + 1));
        let chunk = Chunk {
            preceding_comments: preceding_comments(&lines, line.index),
            signature: normalize_signature(trimmed, family),
            inner_comments: body
                .map(|range| interior_comments(&text[range]))
                .unwrap_or_default(),
            family,
        };

        if let Some(rendered) = chunk.render() {
            if dedup.admit(&rendered) {
                chunks.push(rendered);
            } else {
                trace!(line = line.index + 1, "duplicate chunk suppressed");
            }
        }
    }

    if matched == 0
        && let Some(prologue) = leading_comment_prologue(&lines)
    {
        chunks.push(prologue);
    }

    trace!(?family, signatures = matched, chunks = chunks.len(), "chunk extraction finished");
    chunks
}

/// Run the enabled passes over one file's text.
///
/// `extension` selects the language family (`"py"` and friends for Python,
/// anything else C-like). The result always ends with a newline.
pub fn process(text: &str, extension: &str, options: CompressOptions) -> String {
    let mut data = if options.remove_comments {
        strip_comments(text)
    } else {
        text.to_string()
    };

    if options.remove_empty_lines {
        data = remove_empty_lines(&data);
    }

    if options.compress {
        let chunks = extract_chunks(&data, LanguageFamily::from_extension(extension));
        if !chunks.is_empty() {
            data = chunks.join(CHUNK_SEPARATOR);
        }
    }

    ensure_trailing_newline(data)
}

/// Keep only lines with at least one non-whitespace character, each
/// terminated by `\n`.
fn remove_empty_lines(text: &str) -> String {
    text.split_terminator('\n')
        .filter(|line| !line.trim().is_empty())
        .fold(String::with_capacity(text.len()), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
