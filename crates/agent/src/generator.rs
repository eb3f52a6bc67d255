use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Longest prompt a generator accepts, in characters.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Pattern source produced from a prompt. `code` is meant to be fed straight
/// into DNA extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPattern {
    pub code: String,
}

/// Anything that turns a free-text prompt into pattern code.
///
/// Implementations must be safe to share across threads. Output must parse as
/// a pattern; musical plausibility is not checked downstream.
pub trait PatternGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<GeneratedPattern, GeneratorError>;
}

/// Cache and template key for a prompt: lowercased, whitespace collapsed.
pub fn normalize_prompt(prompt: &str) -> String {
    canonical::collapse_whitespace(&prompt.to_lowercase())
}

/// Rejects blank or oversized prompts.
pub fn validate_prompt(prompt: &str) -> Result<(), GeneratorError> {
    if prompt.trim().is_empty() {
        return Err(GeneratorError::EmptyPrompt);
    }
    let len = prompt.chars().count();
    if len > MAX_PROMPT_CHARS {
        return Err(GeneratorError::PromptTooLong {
            len,
            max: MAX_PROMPT_CHARS,
        });
    }
    Ok(())
}
