//! The Sonic DNA output record.
//!
//! # Structure
//!
//! ```text
//! SonicDna
//! ├── dna: String                  # sorted, de-duplicated features joined by '|'
//! ├── hash: String                 # 64 hex chars of digest(dna || salt)
//! ├── salt: String                 # caller-supplied or freshly generated
//! ├── timestamp: i64               # capture time in unix millis, 0 when unset
//! ├── version: u32                 # DNA format version
//! └── algorithm: DigestAlgorithm   # sha256 | demo-fx
//! ```
//!
//! Records are built once per extraction and never mutated afterwards.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::hash::DigestAlgorithm;

/// Output of one DNA extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SonicDna {
    /// Canonical feature set, e.g. `distort(5)|lpf(500)|s(bass)|slow(2)`.
    pub dna: String,

    /// Hex digest of `dna + salt`.
    pub hash: String,

    /// Salt mixed into `hash`. Needed again to reproduce the hash later.
    pub salt: String,

    /// Unix milliseconds when captured, or 0 when no timestamp was requested.
    pub timestamp: i64,

    /// DNA format version the record was built with.
    pub version: u32,

    /// Digest that produced `hash`.
    pub algorithm: DigestAlgorithm,
}

impl SonicDna {
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != 0
    }

    /// Number of distinct features in the DNA.
    pub fn feature_count(&self) -> usize {
        if self.dna.is_empty() {
            0
        } else {
            self.dna.split(crate::pipeline::FEATURE_SEPARATOR).count()
        }
    }

    /// True when `other` proves the same vibe: same format, same digest path,
    /// and equal hashes (compared in constant time).
    ///
    /// Only meaningful when both records used the same salt.
    pub fn same_vibe(&self, other: &SonicDna) -> bool {
        self.version == other.version
            && self.algorithm == other.algorithm
            && bool::from(self.hash.as_bytes().ct_eq(other.hash.as_bytes()))
    }
}
