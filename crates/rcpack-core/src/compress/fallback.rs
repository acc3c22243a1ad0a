//! Leading comment prologue for files with no detected constructs.

use super::lines::Line;

/// Lines examined when looking for a prologue.
pub const PROLOGUE_SCAN_LIMIT: usize = 200;

/// Collect the comment prologue at the top of a file.
///
/// Blank lines are skipped. `//` lines are taken one at a time, and a line
/// opening with `/*` pulls in every line up to the first one containing `*/`
/// (which may be the opening line itself). The first other line ends the
/// prologue. Returns `None` when nothing was collected.
pub fn leading_comment_prologue(lines: &[Line<'_>]) -> Option<String> {
    let window = &lines[..lines.len().min(PROLOGUE_SCAN_LIMIT)];
    let mut collected: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < window.len() {
        let trimmed = window[i].trimmed();
        if trimmed.is_empty() {
            i += 1;
        } else if trimmed.starts_with("//") {
            collected.push(trimmed);
            i += 1;
        } else if trimmed.starts_with("/*") {
            let mut j = i;
            loop {
                collected.push(window[j].trimmed());
                if window[j].text.contains("*/") || j + 1 == window.len() {
                    break;
                }
                j += 1;
            }
            i = j + 1;
        } else {
            break;
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::lines::split_lines;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_comment_prologue() {
        let lines = split_lines("// header\n// header2\nx = 1\n");
        assert_eq!(
            leading_comment_prologue(&lines).as_deref(),
            Some("// header\n// header2")
        );
    }

    #[test]
    fn test_block_prologue() {
        let lines = split_lines("\n/*\n * License text\n */\nlet x = 1;\n// not reached\n");
        assert_eq!(
            leading_comment_prologue(&lines).as_deref(),
            Some("/*\n* License text\n*/")
        );
    }

    #[test]
    fn test_single_line_block_does_not_swallow_code() {
        let lines = split_lines("/* one-liner */\nx = 1;\n/* later */\n");
        assert_eq!(
            leading_comment_prologue(&lines).as_deref(),
            Some("/* one-liner */")
        );
    }

    #[test]
    fn test_no_prologue() {
        let lines = split_lines("x = 1\n// trailing\n");
        assert_eq!(leading_comment_prologue(&lines), None);
        assert_eq!(leading_comment_prologue(&[]), None);
    }

    #[test]
    fn test_scan_limit() {
        let text: String = std::iter::repeat_n("\n", PROLOGUE_SCAN_LIMIT)
            .chain(std::iter::once("// too late\n"))
            .collect();
        let lines = split_lines(&text);
        assert_eq!(leading_comment_prologue(&lines), None);
    }

    #[test]
    fn test_block_cut_at_scan_limit() {
        let text: String = std::iter::once("/*\n")
            .chain(std::iter::repeat_n(" * line\n", PROLOGUE_SCAN_LIMIT + 5))
            .chain(std::iter::once(" */\n"))
            .collect();
        let lines = split_lines(&text);
        let prologue = leading_comment_prologue(&lines).unwrap();
        assert_eq!(prologue.lines().count(), PROLOGUE_SCAN_LIMIT);
        assert!(!prologue.contains("*/"));
    }
}
