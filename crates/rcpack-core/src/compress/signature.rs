//! Line-local construct detection and signature normalization.
//!
//! Detection is grammar-free: one trimmed line at a time, no lookahead.
//! Signatures split across lines are missed.

use super::scanner::{Scanner, SegmentKind, code_positions};

/// Which detection heuristics apply to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFamily {
    /// Brace-delimited languages. The default for every unknown extension.
    #[default]
    CLike,
    /// Indentation-delimited, `def`/`class` declarations.
    Python,
}

impl LanguageFamily {
    /// Pick a family from a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "py" | "pyi" | "pyw" => LanguageFamily::Python,
            _ => LanguageFamily::CLike,
        }
    }

    /// One-line placeholder for a body with no comments worth keeping.
    pub fn elision_marker(self) -> &'static str {
        match self {
            LanguageFamily::CLike => " { /* ... */ }",
            LanguageFamily::Python => "  # ...",
        }
    }
}

/// Whether a trimmed line looks like a construct declaration.
pub fn is_signature(trimmed: &str, family: LanguageFamily) -> bool {
    if trimmed.is_empty() {
        return false;
    }
    match family {
        LanguageFamily::Python => trimmed.starts_with("def ") || trimmed.starts_with("class "),
        LanguageFamily::CLike => {
            trimmed.starts_with("class ")
                || trimmed.starts_with("struct ")
                || trimmed.starts_with("function ")
                || trimmed.contains(" function ")
                || (trimmed.contains('(') && trimmed.contains(')') && trimmed.contains('{'))
                || (trimmed.contains("=>") && trimmed.contains('{'))
        }
    }
}

/// Reduce a signature line to its declaration head.
///
/// With a parameter list, everything after its balanced closing `)` is
/// dropped. Without one, only a trailing `{` is removed. Python signatures
/// always end in `:`.
pub fn normalize_signature(trimmed: &str, family: LanguageFamily) -> String {
    let head = if trimmed.contains('(') {
        match through_parameter_list(trimmed) {
            Some(head) => head,
            None => code_positions(trimmed, b'{')
                .next()
                .map_or(trimmed, |brace| &trimmed[..brace]),
        }
    } else {
        trimmed.strip_suffix('{').unwrap_or(trimmed)
    };

    let mut signature = head.trim().to_string();
    if family == LanguageFamily::Python && !signature.ends_with(':') {
        signature.push(':');
    }
    signature
}

/// The prefix of `line` ending at the `)` that balances its first `(`.
/// Parentheses inside literals and comments are ignored.
fn through_parameter_list(line: &str) -> Option<&str> {
    let mut depth: usize = 0;
    for seg in Scanner::new(line).filter(|seg| seg.kind == SegmentKind::Code) {
        for (i, byte) in line.as_bytes()[seg.range.clone()].iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&line[..=seg.range.start + i]);
                    }
                }
                _ => {}
            }
        }
    }
    None
}
