//! Body location: finding a construct's opening brace and its match.

use super::lines::Line;
use super::scanner::{Scanner, SegmentKind};
use super::signature::LanguageFamily;

/// Find the offset of the `}` matching the `{` at `open`.
///
/// Braces inside literals and comments never count. Returns `None` when
/// `open` is not a `{` or the buffer ends with the depth still positive;
/// callers then treat the construct as having no body.
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'{') {
        return None;
    }

    let tail = &text[open..];
    let mut depth: usize = 0;
    for seg in Scanner::new(tail).filter(|seg| seg.kind == SegmentKind::Code) {
        for (i, byte) in tail.as_bytes()[seg.range.clone()].iter().enumerate() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(open + seg.range.start + i);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Find the `{` that opens the body of the construct declared on `line`.
///
/// Python only looks at the signature line itself. C-like languages keep
/// scanning past the line, so Allman-style braces on the next line are found.
/// A `;` on the signature line only ends the search when no `{` follows it on
/// that line (`class Forward;`). Past the line, a `;` reached before any `{`
/// marks a prototype without a body.
pub fn find_opening_brace(text: &str, line: &Line<'_>, family: LanguageFamily) -> Option<usize> {
    let end = match family {
        LanguageFamily::Python => line.end(),
        LanguageFamily::CLike => text.len(),
    };
    let window = &text[line.offset..end];
    let line_len = line.text.len();
    let mut semicolon_on_line = false;

    for seg in Scanner::new(window).filter(|seg| seg.kind == SegmentKind::Code) {
        for (i, byte) in window.as_bytes()[seg.range.clone()].iter().enumerate() {
            let pos = seg.range.start + i;
            if pos >= line_len && semicolon_on_line {
                return None;
            }
            match byte {
                b'{' => return Some(line.offset + pos),
                b';' if pos < line_len => semicolon_on_line = true,
                b';' => return None,
                _ => {}
            }
        }
    }
    None
}
