//! Hash commitments over a DNA digest.
//!
//! The commitment layer publishes `commit = SHA-256(hash || blinding)` and
//! later opens it by revealing `hash` and `blinding`. Both inputs are hex; the
//! digest runs over their decoded bytes. The blinding factor is independent of
//! the DNA salt and comes from the OS CSPRNG.
//!
//! ```rust
//! use canonical::{commit_hash, hash_dna, verify_commitment};
//!
//! let hash = hash_dna("lpf(500)|s(bass)", "salt");
//! let sealed = commit_hash(&hash).unwrap();
//! assert!(verify_commitment(&sealed.commitment, &hash, &sealed.blinding).unwrap());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::CanonicalError;
use crate::salt::random_hex;

/// Bytes of randomness in a blinding factor.
pub const BLINDING_BYTES: usize = 32;

/// A published commitment together with the secret that opens it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment {
    pub commitment: String,
    pub blinding: String,
}

/// Fresh hex blinding factor.
pub fn generate_blinding() -> Result<String, CanonicalError> {
    random_hex(BLINDING_BYTES)
}

/// Commits to `hash_hex` under a freshly generated blinding factor.
pub fn commit_hash(hash_hex: &str) -> Result<Commitment, CanonicalError> {
    let blinding = generate_blinding()?;
    let commitment = commit(hash_hex, &blinding)?;
    Ok(Commitment {
        commitment,
        blinding,
    })
}

/// `SHA-256(hex_decode(hash) || hex_decode(blinding))`, hex-encoded.
pub fn commit(hash_hex: &str, blinding_hex: &str) -> Result<String, CanonicalError> {
    let hash = decode(hash_hex, "hash")?;
    let blinding = decode(blinding_hex, "blinding")?;
    if blinding.is_empty() {
        return Err(CanonicalError::InvalidHex("blinding must not be empty".into()));
    }
    let mut hasher = Sha256::new();
    hasher.update(&hash);
    hasher.update(&blinding);
    Ok(hex::encode(hasher.finalize()))
}

/// Opens `commitment` against a revealed hash and blinding factor.
pub fn verify_commitment(
    commitment: &str,
    hash_hex: &str,
    blinding_hex: &str,
) -> Result<bool, CanonicalError> {
    let expected = commit(hash_hex, blinding_hex)?;
    let candidate = commitment.to_ascii_lowercase();
    Ok(bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())))
}

fn decode(value: &str, what: &str) -> Result<Vec<u8>, CanonicalError> {
    hex::decode(value).map_err(|err| CanonicalError::InvalidHex(format!("{what}: {err}")))
}
