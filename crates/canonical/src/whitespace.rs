//! Whitespace normalization utilities.

/// Collapses runs of Unicode whitespace to single spaces and trims the edges.
///
/// Used wherever free text becomes a lookup key (prompt caches, for one), so
/// that `"Muffled\n  bass"` and `"muffled bass"` can share an entry once
/// lowercased.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \t\n world  "), "hello world");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
