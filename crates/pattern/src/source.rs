//! Input validation for raw pattern sources.
//!
//! A pattern source must contain something other than whitespace and must not
//! exceed the configured character limit. Oversized input is rejected, never
//! truncated: truncation would silently change the DNA.

use crate::error::PatternError;

/// Default upper bound on pattern length, in characters.
pub const DEFAULT_MAX_SOURCE_CHARS: usize = 2000;

/// Checks that `source` is non-blank and at most `max_chars` characters long.
///
/// Length is measured in Unicode scalar values, not bytes.
///
/// ```rust
/// use pattern::{validate_source, PatternError};
///
/// assert!(validate_source("s(\"bd\")", 100).is_ok());
/// assert_eq!(validate_source("   ", 100), Err(PatternError::EmptySource));
/// assert!(matches!(
///     validate_source("aaaa", 3),
///     Err(PatternError::SourceTooLong { len: 4, max: 3 })
/// ));
/// ```
pub fn validate_source(source: &str, max_chars: usize) -> Result<(), PatternError> {
    if source.trim().is_empty() {
        return Err(PatternError::EmptySource);
    }

    // Byte length bounds char length from above, so short inputs skip the count.
    if source.len() <= max_chars {
        return Ok(());
    }
    let len = source.chars().count();
    if len > max_chars {
        return Err(PatternError::SourceTooLong {
            len,
            max: max_chars,
        });
    }
    Ok(())
}
