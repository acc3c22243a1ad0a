//! Quote/comment state machine shared by every stage of the engine.
//!
//! [`QuoteState::step`] is the single transition function. [`Scanner`] drives
//! it over a buffer and groups the bytes into [`Segment`]s: runs of plain
//! code, string/char literals, line comments and block comments. Brace
//! matching, comment collection, signature normalization and comment
//! stripping all consume segments, so they agree on what is "inside a string".
//!
//! All positions are byte offsets. Only ASCII bytes drive transitions, so
//! segment boundaries always fall on UTF-8 character boundaries.

use std::ops::Range;

/// Lexical context at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Normal,
    InSingleQuote,
    InDoubleQuote,
    InBacktick,
    InLineComment,
    InBlockComment,
}

impl QuoteState {
    /// Consume the bytes at the front of `rest` and return the next state
    /// together with the number of bytes consumed.
    ///
    /// Every input byte has a defined transition, so the count is at least 1
    /// whenever `rest` is non-empty. Inside a literal a backslash consumes the
    /// following byte unconditionally. Comment openers are only recognized in
    /// [`QuoteState::Normal`], and quote characters inside comments are plain
    /// text. Block comments do not nest.
    pub fn step(self, rest: &[u8]) -> (QuoteState, usize) {
        let Some(&byte) = rest.first() else {
            return (self, 0);
        };
        let next = rest.get(1).copied();

        match self {
            QuoteState::Normal => match (byte, next) {
                (b'"', _) => (QuoteState::InDoubleQuote, 1),
                (b'\'', _) => (QuoteState::InSingleQuote, 1),
                (b'`', _) => (QuoteState::InBacktick, 1),
                (b'/', Some(b'/')) => (QuoteState::InLineComment, 2),
                (b'/', Some(b'*')) => (QuoteState::InBlockComment, 2),
                _ => (QuoteState::Normal, 1),
            },
            QuoteState::InSingleQuote | QuoteState::InDoubleQuote | QuoteState::InBacktick => {
                if byte == b'\\' {
                    (self, rest.len().min(2))
                } else if Some(byte) == self.closing_quote() {
                    (QuoteState::Normal, 1)
                } else {
                    (self, 1)
                }
            }
            QuoteState::InLineComment => {
                if byte == b'\n' {
                    (QuoteState::Normal, 1)
                } else {
                    (self, 1)
                }
            }
            QuoteState::InBlockComment => {
                if byte == b'*' && next == Some(b'/') {
                    (QuoteState::Normal, 2)
                } else {
                    (self, 1)
                }
            }
        }
    }

    fn closing_quote(self) -> Option<u8> {
        match self {
            QuoteState::InSingleQuote => Some(b'\''),
            QuoteState::InDoubleQuote => Some(b'"'),
            QuoteState::InBacktick => Some(b'`'),
            _ => None,
        }
    }
}

/// What a [`Segment`] contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Bytes scanned in [`QuoteState::Normal`].
    Code,
    /// A quoted literal, delimiters included.
    Literal,
    /// `//` up to, but not including, the terminating newline.
    LineComment,
    /// `/*` through `*/` inclusive.
    BlockComment,
}

impl SegmentKind {
    fn opened_by(state: QuoteState) -> Self {
        match state {
            QuoteState::Normal => SegmentKind::Code,
            QuoteState::InSingleQuote | QuoteState::InDoubleQuote | QuoteState::InBacktick => {
                SegmentKind::Literal
            }
            QuoteState::InLineComment => SegmentKind::LineComment,
            QuoteState::InBlockComment => SegmentKind::BlockComment,
        }
    }

    /// Whether this segment is a comment of either kind.
    pub fn is_comment(self) -> bool {
        matches!(self, SegmentKind::LineComment | SegmentKind::BlockComment)
    }
}

/// A contiguous run of bytes sharing one lexical context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Byte range relative to the scanned buffer.
    pub range: Range<usize>,
    /// `false` when the literal or comment ran into end-of-buffer.
    pub terminated: bool,
}

impl Segment {
    /// The segment's text within `source`, the buffer it was scanned from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Iterator over the [`Segment`]s of a buffer, starting in
/// [`QuoteState::Normal`] at offset 0.
///
/// Segments are contiguous and cover the whole buffer. An unterminated
/// literal or comment simply ends the scan in that state.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let start = self.pos;
        if start >= self.bytes.len() {
            return None;
        }

        let (opened, consumed) = QuoteState::Normal.step(&self.bytes[start..]);
        let kind = SegmentKind::opened_by(opened);
        let mut pos = start + consumed;

        if opened == QuoteState::Normal {
            while pos < self.bytes.len() {
                let (state, consumed) = QuoteState::Normal.step(&self.bytes[pos..]);
                if state != QuoteState::Normal {
                    break;
                }
                pos += consumed;
            }
            self.pos = pos;
            return Some(Segment {
                kind,
                range: start..pos,
                terminated: true,
            });
        }

        let mut state = opened;
        while pos < self.bytes.len() && state != QuoteState::Normal {
            let (next, consumed) = state.step(&self.bytes[pos..]);
            if state == QuoteState::InLineComment && next == QuoteState::Normal {
                // The newline belongs to the code that follows.
                state = next;
                break;
            }
            state = next;
            pos += consumed;
        }

        self.pos = pos;
        Some(Segment {
            kind,
            range: start..pos,
            terminated: state == QuoteState::Normal,
        })
    }
}

/// Byte offsets of `needle` found in code segments only.
pub fn code_positions(text: &str, needle: u8) -> impl Iterator<Item = usize> + '_ {
    Scanner::new(text)
        .filter(|seg| seg.kind == SegmentKind::Code)
        .flat_map(move |seg| {
            let base = seg.range.start;
            text.as_bytes()[seg.range]
                .iter()
                .enumerate()
                .filter(move |(_, b)| **b == needle)
                .map(move |(i, _)| base + i)
        })
}
