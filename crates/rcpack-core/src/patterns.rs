//! Include/exclude pattern helpers shared by the CLI and the scanner.

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_comma(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize an include token to a lowercase `.ext` form.
///
/// Accepts `*.ext`, `.ext` and `ext`, optionally wrapped in quotes. Anything
/// else (wildcards elsewhere, path separators, empty) is not an extension.
pub fn normalize_extension_token(token: &str) -> Option<String> {
    let token = token.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    let ext = token
        .strip_prefix("*.")
        .or_else(|| token.strip_prefix('.'))
        .unwrap_or(token);

    let valid = !ext.is_empty()
        && !ext.contains(['*', '?', '/', '\\', '.'])
        && !ext.chars().any(char::is_whitespace);
    valid.then(|| format!(".{}", ext.to_ascii_lowercase()))
}
