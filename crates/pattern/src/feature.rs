use serde::{Deserialize, Serialize};

/// One call argument, classified once when it is read from the tree.
///
/// Only the literal variants contribute to a DNA; [`Argument::Unsupported`]
/// covers variables, expressions, nested calls and anything else without a
/// static value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Argument {
    Number(f64),
    Text(String),
    Bool(bool),
    Unsupported,
}

impl Argument {
    pub fn is_literal(&self) -> bool {
        !matches!(self, Argument::Unsupported)
    }
}

/// A call-like node found in a pattern: callee name plus its literal
/// arguments in positional order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCall {
    pub name: String,
    pub args: Vec<Argument>,
}

impl FeatureCall {
    pub fn new(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}
