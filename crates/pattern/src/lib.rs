//! Sonic DNA pattern front end.
//!
//! Turns a live-coding pattern (a small JavaScript expression such as
//! `s("bass").slow(2).lpf(500)`) into the raw list of feature calls that the
//! canonical layer fingerprints.
//!
//! ## What we do
//!
//! - Validate the raw source (non-blank, bounded length)
//! - Parse it with tree-sitter's JavaScript grammar, rejecting any syntax error
//! - Walk every node and pull out call expressions: callee name plus literal
//!   arguments, classified once into [`Argument`]
//!
//! ## What we don't do
//!
//! No evaluation, no scope resolution, no mini-notation parsing. A variable
//! passed as an argument is simply not a literal and gets dropped.
//!
//! ## Invariants worth knowing
//!
//! - Output depends only on the source text
//! - Whitespace, comments, and quote style never reach a [`FeatureCall`]
//! - Traversal is iterative and visits each node once

mod error;
mod extract;
mod feature;
mod literal;
mod parse;
mod source;

pub use crate::error::PatternError;
pub use crate::extract::extract_features;
pub use crate::feature::{Argument, FeatureCall};
pub use crate::parse::{parse_pattern, PatternTree};
pub use crate::source::{validate_source, DEFAULT_MAX_SOURCE_CHARS};
