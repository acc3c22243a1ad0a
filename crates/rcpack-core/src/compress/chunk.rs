//! A single compressed construct and its rendering.

use super::signature::LanguageFamily;

/// Interior comment lines kept per body.
pub const MAX_INNER_COMMENT_LINES: usize = 6;

/// Placeholder line standing in for the code of a body that kept comments.
const BODY_ELISION: &str = "  /* ... */";

/// One detected construct: its documentation, normalized signature and the
/// comments found inside its body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    pub preceding_comments: Vec<String>,
    pub signature: String,
    pub inner_comments: Vec<String>,
    pub family: LanguageFamily,
}

impl Chunk {
    /// Render the chunk as text, trimmed at both ends.
    ///
    /// Returns `None` when nothing but whitespace would remain, so an empty
    /// chunk is never emitted.
    pub fn render(&self) -> Option<String> {
        let mut out = String::new();

        if !self.preceding_comments.is_empty() {
            out.push_str(&self.preceding_comments.join("\n"));
            out.push('\n');
        }
        out.push_str(&self.signature);

        if self.inner_comments.is_empty() {
            out.push_str(self.family.elision_marker());
        } else {
            out.push_str(" {\n");
            out.push_str(&self.inner_comments.join("\n"));
            out.push('\n');
            out.push_str(BODY_ELISION);
            out.push_str("\n}");
        }

        let rendered = out.trim();
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_with_inner_comments() {
        let chunk = Chunk {
            preceding_comments: vec!["// Header".to_string()],
            signature: "void foo()".to_string(),
            inner_comments: vec!["// step one".to_string()],
            family: LanguageFamily::CLike,
        };
        assert_eq!(
            chunk.render().unwrap(),
            "// Header\nvoid foo() {\n// step one\n  /* ... */\n}"
        );
    }

    #[test]
    fn test_render_without_inner_comments() {
        let chunk = Chunk {
            signature: "int add(int a, int b)".to_string(),
            ..Chunk::default()
        };
        assert_eq!(chunk.render().unwrap(), "int add(int a, int b) { /* ... */ }");
    }

    #[test]
    fn test_render_python_marker() {
        let chunk = Chunk {
            signature: "def bar():".to_string(),
            family: LanguageFamily::Python,
            ..Chunk::default()
        };
        assert_eq!(chunk.render().unwrap(), "def bar():  # ...");
    }

    #[test]
    fn test_render_trims_surrounding_whitespace() {
        let chunk = Chunk {
            preceding_comments: vec![String::new()],
            signature: "struct S".to_string(),
            ..Chunk::default()
        };
        assert_eq!(chunk.render().unwrap(), "struct S { /* ... */ }");
    }
}
