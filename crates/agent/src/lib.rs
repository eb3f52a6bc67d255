//! Sonic DNA pattern generators.
//!
//! The DNA core only consumes pattern code; this crate is the collaborator
//! that produces it from a free-text prompt. It ships the generator contract,
//! an offline [`TemplateGenerator`], and a [`CachedGenerator`] wrapper whose
//! cache is an explicit, shareable value.
//!
//! ```rust
//! use std::sync::Arc;
//! use agent::{CachedGenerator, PatternGenerator, PromptCache, TemplateGenerator};
//!
//! let generator = CachedGenerator::new(TemplateGenerator::new(), Arc::new(PromptCache::default()));
//! let pattern = generator.generate("muffled bass").unwrap();
//! assert!(pattern.code.contains("lpf"));
//! ```

mod cache;
mod error;
mod generator;
mod templates;

pub use crate::cache::{CachedGenerator, PromptCache, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
pub use crate::error::GeneratorError;
pub use crate::generator::{
    normalize_prompt, validate_prompt, GeneratedPattern, PatternGenerator, MAX_PROMPT_CHARS,
};
pub use crate::templates::{Template, TemplateGenerator, FALLBACK, TEMPLATES};
