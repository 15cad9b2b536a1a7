// file: src/parser/slug.rs
// description: URL-safe slug derivation from title text
// reference: output shape [a-z0-9]+(-[a-z0-9]+)*

/// Lowercase a title into a dash-separated identifier.
///
/// Characters outside ASCII letters, digits, whitespace, and dashes are
/// dropped. Whitespace runs and repeated dashes collapse to a single dash;
/// leading and trailing dashes are trimmed. Total: empty input (or input
/// with no usable characters) yields an empty string, which callers must
/// treat as invalid and substitute a fallback.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
        // anything else is stripped without acting as a separator
    }

    slug
}
