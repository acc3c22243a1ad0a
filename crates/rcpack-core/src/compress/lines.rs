//! Line view over a text buffer.

/// One line of a buffer: its 0-based index, the byte offset of its first
/// byte, and its text without the terminating `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// Byte offset one past the line's last byte (the `\n`, if any).
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split `text` on `\n`. A trailing newline yields a final empty line, so
/// offsets always line up with the buffer.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let current = Line {
                index,
                offset,
                text: line,
            };
            offset += line.len() + 1;
            current
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_offsets() {
        let text = "ab\n\ncd\n";
        let lines = split_lines(text);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].text, "cd");
        assert_eq!(lines[2].offset, 4);
        assert_eq!(&text[lines[2].offset..lines[2].end()], "cd");
        assert!(lines[3].text.is_empty());
    }

    #[test]
    fn test_blank_detection() {
        let lines = split_lines("  \t\nx");
        assert!(lines[0].is_blank());
        assert!(!lines[1].is_blank());
    }
}
