use thiserror::Error;

/// Errors raised while validating or parsing a pattern source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern source is empty")]
    EmptySource,
    #[error("pattern source has {len} characters; the limit is {max}")]
    SourceTooLong { len: usize, max: usize },
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("pattern parser unavailable: {0}")]
    ParserUnavailable(String),
}

impl PatternError {
    /// True for empty or oversized input, i.e. the source never reached the parser.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PatternError::EmptySource | PatternError::SourceTooLong { .. }
        )
    }
}
