use thiserror::Error;

/// Errors that can occur while canonicalizing features or building a digest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("pattern has no feature calls after filtering")]
    NoFeatures,
    #[error("secure digest unavailable: {0}")]
    DigestUnavailable(String),
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
}
