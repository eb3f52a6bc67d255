use thiserror::Error;

/// Errors produced by pattern generators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("prompt has {len} characters; the limit is {max}")]
    PromptTooLong { len: usize, max: usize },
    #[error("generator unavailable: {0}")]
    Unavailable(String),
}
