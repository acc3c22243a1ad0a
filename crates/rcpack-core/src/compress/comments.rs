//! Comment collection: documentation above a signature, comments inside a
//! body, and the global comment-stripping pass.

use super::chunk::MAX_INNER_COMMENT_LINES;
use super::lines::Line;
use super::scanner::{Scanner, SegmentKind};

/// Blank lines the backward walk may step over in total.
const BLANK_LINE_ALLOWANCE: usize = 1;

/// Whether a line holds nothing but a comment (or a `#` directive).
pub fn is_comment_only(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with('#') || t.starts_with("//") || t.starts_with("/*") || t.starts_with("*/")
}

/// Whether a trimmed line is the last line of a multi-line block comment.
fn closes_block(trimmed: &str) -> bool {
    trimmed.starts_with("*/") || (trimmed.starts_with('*') && trimmed.ends_with("*/"))
}

/// Whether `line` opens a block comment with only whitespace before it and
/// leaves it open past the end of the line. A block closed on the same line
/// cannot be the opener of a later `*/`.
fn opens_block_at_line_start(line: &str) -> bool {
    for seg in Scanner::new(line) {
        match seg.kind {
            SegmentKind::Code if seg.text(line).trim().is_empty() => continue,
            SegmentKind::BlockComment => return !seg.terminated,
            _ => return false,
        }
    }
    false
}

/// Index of the line opening the block comment that ends on line `end`.
fn block_start(lines: &[Line<'_>], end: usize) -> Option<usize> {
    for j in (0..=end).rev() {
        let text = lines[j].text;
        if opens_block_at_line_start(text) {
            return Some(j);
        }
        if j < end && text.contains("*/") {
            // Reached the end of an earlier block first.
            return None;
        }
    }
    None
}

/// Collect the comment block directly above the signature on line `index`.
///
/// Walks upward over comment-only lines, stepping over at most one blank
/// line, and expands a trailing `*/` into its whole block comment. Lines come
/// back trimmed, in top-to-bottom order.
pub fn preceding_comments(lines: &[Line<'_>], index: usize) -> Vec<String> {
    let mut collected: Vec<&str> = Vec::new();
    let mut blanks_left = BLANK_LINE_ALLOWANCE;
    let mut next = index.min(lines.len());

    while next > 0 {
        let current = next - 1;
        let trimmed = lines[current].trimmed();

        if trimmed.is_empty() {
            if blanks_left == 0 {
                break;
            }
            blanks_left -= 1;
            next = current;
            continue;
        }

        if closes_block(trimmed)
            && let Some(start) = block_start(lines, current)
        {
            collected.extend((start..=current).rev().map(|k| lines[k].trimmed()));
            next = start;
            continue;
        }

        if is_comment_only(trimmed) {
            collected.push(trimmed);
            next = current;
            continue;
        }

        break;
    }

    collected.reverse();
    collected.into_iter().map(str::to_string).collect()
}

/// Comment lines found inside a body, trimmed and in source order, capped at
/// [`MAX_INNER_COMMENT_LINES`] non-empty lines.
///
/// `body` is the text between (and including) a matched brace pair. Comment
/// markers inside literals are never collected.
pub fn interior_comments(body: &str) -> Vec<String> {
    Scanner::new(body)
        .filter(|seg| seg.kind.is_comment())
        .flat_map(|seg| seg.text(body).lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_INNER_COMMENT_LINES)
        .map(str::to_string)
        .collect()
}

/// Remove every `//` and `/* */` comment outside literals. Newlines that end
/// line comments are kept.
pub fn strip_comments(text: &str) -> String {
    Scanner::new(text)
        .filter(|seg| !seg.kind.is_comment())
        .map(|seg| seg.text(text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::lines::split_lines;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_comment_only() {
        assert!(is_comment_only("   // note"));
        assert!(is_comment_only("# python comment"));
        assert!(is_comment_only("/* open"));
        assert!(is_comment_only(" */"));
        assert!(!is_comment_only(""));
        assert!(!is_comment_only("int x; // trailing"));
        assert!(!is_comment_only(" * middle of a block"));
    }

    #[test]
    fn test_preceding_contiguous_block_with_gap() {
        let text = "// Header comment line 1\n// Header comment line 2\n\nvoid foo() {\n  // body\n}";
        let lines = split_lines(text);
        assert_eq!(
            preceding_comments(&lines, 3),
            vec!["// Header comment line 1", "// Header comment line 2"]
        );
    }

    #[test]
    fn test_preceding_stops_after_second_blank() {
        let text = "// far away\n\n// near\n\nvoid foo() {}";
        let lines = split_lines(text);
        assert_eq!(preceding_comments(&lines, 4), vec!["// near"]);
    }

    #[test]
    fn test_preceding_stops_at_code() {
        let text = "int g;\n// doc\nvoid foo() {}";
        let lines = split_lines(text);
        assert_eq!(preceding_comments(&lines, 2), vec!["// doc"]);
    }

    #[test]
    fn test_preceding_reconstructs_block_comment() {
        let text = "int g;\n/**\n * Adds numbers.\n * @param a first\n */\nint add(int a) {\n}";
        let lines = split_lines(text);
        assert_eq!(
            preceding_comments(&lines, 5),
            vec!["/**", "* Adds numbers.", "* @param a first", "*/"]
        );
    }

    #[test]
    fn test_preceding_block_opener_inside_string_ignored() {
        let text = "/* real\n  s = \"/* fake\";\n*/\nvoid f() {}";
        let lines = split_lines(text);
        let got = preceding_comments(&lines, 3);
        assert_eq!(got.first().map(String::as_str), Some("/* real"));
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_preceding_unresolved_block_end_is_comment_only() {
        let text = "code();\n*/\nvoid f() {}";
        let lines = split_lines(text);
        assert_eq!(preceding_comments(&lines, 2), vec!["*/"]);
    }

    #[test]
    fn test_preceding_one_line_block_is_not_an_opener() {
        let text = "/* license */\nint global = 1;\nint x; /* trailing\n*/\nvoid f() {\n}\n";
        let lines = split_lines(text);
        assert_eq!(preceding_comments(&lines, 4), vec!["*/"]);
    }

    #[test]
    fn test_opens_block_at_line_start() {
        assert!(opens_block_at_line_start("  /** doc"));
        assert!(!opens_block_at_line_start("/* closed */"));
        assert!(!opens_block_at_line_start("int x; /* trailing"));
    }

    #[test]
    fn test_preceding_at_first_line_is_empty() {
        let lines = split_lines("void f() {}");
        assert!(preceding_comments(&lines, 0).is_empty());
    }

    #[test]
    fn test_interior_comments_skip_literals() {
        let s = "{ // line comment\n int x = 1; /* block comment */ std::string s = \"/* not comment */\"; // another\n }";
        assert_eq!(
            interior_comments(s),
            vec!["// line comment", "/* block comment */", "// another"]
        );
    }

    #[test]
    fn test_interior_comments_capped() {
        let body: String = std::iter::once("{\n".to_string())
            .chain((0..10).map(|i| format!("  // note {i}\n")))
            .chain(std::iter::once("}".to_string()))
            .collect();
        let got = interior_comments(&body);
        assert_eq!(got.len(), MAX_INNER_COMMENT_LINES);
        assert_eq!(got[0], "// note 0");
        assert_eq!(got[5], "// note 5");
    }

    #[test]
    fn test_interior_block_comment_split_into_lines() {
        let body = "{\n  /* first\n\n     second */\n}";
        assert_eq!(interior_comments(body), vec!["/* first", "second */"]);
    }

    #[test]
    fn test_strip_comments_keeps_literals() {
        let content = "std::string s = \"// not a comment\";  // real comment\nint x = 1; /* gone */\n";
        let out = strip_comments(content);
        assert_eq!(out, "std::string s = \"// not a comment\";  \nint x = 1; \n");
    }

    #[test]
    fn test_strip_unterminated_block_comment() {
        assert_eq!(strip_comments("keep /* never closed\nmore"), "keep ");
    }
}
