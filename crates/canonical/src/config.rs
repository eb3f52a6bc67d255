//! Configuration types for the DNA pipeline.
//!
//! This module defines [`DnaConfig`], which bounds the accepted pattern size,
//! names the infrastructure calls left out of a DNA, and sizes generated salts.
//!
//! # Versioning
//!
//! The `version` field pins the DNA format. A stored hash can only be
//! reproduced by the exact normalization rules that created it, so those rules
//! are constants of the format version rather than knobs:
//!
//! | Format version | Numeric precision | Text arguments |
//! |----------------|-------------------|----------------|
//! | 1              | 1 decimal place   | lowercase, then trim |
//!
//! Any change to normalization or rendering (even a bug fix) needs a new
//! format version.
//!
//! # Denylist
//!
//! The denylist removes calls that wrap or pass through a pattern without
//! shaping its sound. The default excludes only `evaluate` and `id`. Widening
//! it makes more rewrites compare equal but costs discriminative power; it is
//! part of the configuration a deployment must keep fixed for its lifetime.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{DnaConfig, DNA_FORMAT_VERSION};
//!
//! let config = DnaConfig::default();
//! assert_eq!(config.version, DNA_FORMAT_VERSION);
//! assert_eq!(config.max_source_chars, 2000);
//! assert!(config.is_denied("evaluate"));
//! assert!(!config.is_denied("lpf"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Current DNA format version.
pub const DNA_FORMAT_VERSION: u32 = 1;

/// Decimal places kept for numeric arguments under format version 1.
pub const NUMERIC_PRECISION: u32 = 1;

/// Infrastructure and no-op calls excluded from the DNA by default.
pub const DEFAULT_DENYLIST: &[&str] = &["evaluate", "id"];

/// Smallest accepted salt size (128 bits).
pub const MIN_SALT_BYTES: usize = 16;

/// Configuration for the DNA pipeline.
///
/// Cheap to clone and serializable so it can live in a config file:
///
/// ```json
/// {
///   "version": 1,
///   "max_source_chars": 2000,
///   "denylist": ["evaluate", "id"],
///   "salt_bytes": 16
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DnaConfig {
    /// DNA format version. Must equal [`DNA_FORMAT_VERSION`].
    pub version: u32,

    /// Longest accepted pattern, in characters. Longer input is rejected.
    pub max_source_chars: usize,

    /// Callee names whose calls never contribute to the DNA.
    pub denylist: Vec<String>,

    /// Size in bytes of freshly generated salts. At least [`MIN_SALT_BYTES`].
    pub salt_bytes: usize,
}

impl DnaConfig {
    /// Rejects configurations that could not produce a sound DNA.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version != DNA_FORMAT_VERSION {
            return Err(CanonicalError::InvalidConfig(format!(
                "unsupported dna format version {} (expected {DNA_FORMAT_VERSION})",
                self.version
            )));
        }
        if self.max_source_chars == 0 {
            return Err(CanonicalError::InvalidConfig(
                "max_source_chars must be >= 1".into(),
            ));
        }
        if self.salt_bytes < MIN_SALT_BYTES {
            return Err(CanonicalError::InvalidConfig(format!(
                "salt_bytes must be >= {MIN_SALT_BYTES}, got {}",
                self.salt_bytes
            )));
        }
        if self.denylist.iter().any(|name| name.trim().is_empty()) {
            return Err(CanonicalError::InvalidConfig(
                "denylist entries must be non-empty".into(),
            ));
        }
        Ok(())
    }

    /// True when calls named `name` are excluded from the DNA.
    pub fn is_denied(&self, name: &str) -> bool {
        self.denylist.iter().any(|denied| denied == name)
    }
}

impl Default for DnaConfig {
    fn default() -> Self {
        Self {
            version: DNA_FORMAT_VERSION,
            max_source_chars: pattern::DEFAULT_MAX_SOURCE_CHARS,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            salt_bytes: MIN_SALT_BYTES,
        }
    }
}
