//! Hashing utilities for the DNA digest.
//!
//! # Hash Algorithms
//!
//! ## Commitment digest
//!
//! ```text
//! SHA-256(dna_bytes || salt_bytes) → 64 lowercase hex chars
//! ```
//!
//! This is the only digest a registration, recovery, or commitment may use.
//!
//! ## Demo digest
//!
//! ```text
//! for lane in 0..4: FxHash64(lane || dna_bytes || 0xff || salt_bytes)
//! ```
//!
//! Four 64-bit FxHash lanes concatenated to the same 64-hex shape. Fast and
//! deterministic, but trivially invertible by brute force; records built with
//! it are labelled [`DigestAlgorithm::DemoFx`].
//!
//! # Examples
//!
//! ```rust
//! use canonical::{hash_dna, demo_hash};
//!
//! let hash = hash_dna("lpf(500)|s(bass)", "salt");
//! assert_eq!(hash.len(), 64);
//! assert_ne!(hash, demo_hash("lpf(500)|s(bass)", "salt"));
//! ```

use std::fmt;
use std::hash::Hasher;

use fxhash::FxHasher64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex length of every digest this crate produces.
pub const DIGEST_HEX_LEN: usize = 64;

/// Which digest produced a record's `hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "demo-fx")]
    DemoFx,
}

impl DigestAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::DemoFx => "demo-fx",
        }
    }

    /// True when the digest may back a commitment.
    pub fn is_secure(self) -> bool {
        matches!(self, DigestAlgorithm::Sha256)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SHA-256 of arbitrary bytes as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Salted commitment digest: `SHA-256(dna || salt)`, hex-encoded.
pub fn hash_dna(dna: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dna.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// The preimage [`hash_dna`] digests, for providers that hash remotely.
pub fn dna_preimage(dna: &str, salt: &str) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(dna.len() + salt.len());
    preimage.extend_from_slice(dna.as_bytes());
    preimage.extend_from_slice(salt.as_bytes());
    preimage
}

/// Non-cryptographic demo digest with the same 64-hex shape as [`hash_dna`].
///
/// Never use this for anything that will be committed or compared for
/// recovery.
pub fn demo_hash(dna: &str, salt: &str) -> String {
    let mut out = String::with_capacity(DIGEST_HEX_LEN);
    for lane in 0u8..4 {
        let mut hasher = FxHasher64::default();
        hasher.write(&[lane]);
        hasher.write(dna.as_bytes());
        hasher.write(&[0xff]);
        hasher.write(salt.as_bytes());
        out.push_str(&format!("{:016x}", hasher.finish()));
    }
    out
}

/// True for exactly 64 lowercase hex characters.
pub fn is_digest_hex(candidate: &str) -> bool {
    candidate.len() == DIGEST_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_sha256_of_concatenation() {
        let dna = "lpf(500)|s(bass)";
        let salt = "x";
        assert_eq!(hash_dna(dna, salt), sha256_hex(b"lpf(500)|s(bass)x"));
        assert_eq!(sha256_hex(&dna_preimage(dna, salt)), hash_dna(dna, salt));
    }

    #[test]
    fn known_vector() {
        // SHA-256("abc")
        assert_eq!(
            hash_dna("ab", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn salt_changes_hash() {
        assert_ne!(hash_dna("s(bd)", "a"), hash_dna("s(bd)", "b"));
    }

    #[test]
    fn demo_hash_shape_and_determinism() {
        let a = demo_hash("s(bd)", "salt");
        assert!(is_digest_hex(&a));
        assert_eq!(a, demo_hash("s(bd)", "salt"));
        assert_ne!(a, demo_hash("s(bd)", "other"));
    }

    #[test]
    fn demo_hash_separates_dna_from_salt() {
        assert_ne!(demo_hash("ab", "c"), demo_hash("a", "bc"));
    }

    #[test]
    fn digest_hex_check() {
        assert!(is_digest_hex(&hash_dna("a", "b")));
        assert!(!is_digest_hex("abc"));
        assert!(!is_digest_hex(&hash_dna("a", "b").to_uppercase()));
    }

    #[test]
    fn algorithm_labels() {
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "sha256");
        assert!(!DigestAlgorithm::DemoFx.is_secure());
    }
}
