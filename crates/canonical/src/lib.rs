//! Sonic DNA canonical layer.
//!
//! Turns the raw feature calls found in a pattern into a deterministic,
//! versioned DNA string and a salted digest of it. Two renderings of the same
//! musical idea (reordered chains, different quoting, extra whitespace,
//! duplicated calls) land on the same DNA; different ideas do not.
//!
//! ## What we do
//!
//! - Argument normalization (one-decimal rounding, lowercase + trim for text)
//! - Denylist filtering of infrastructure calls (`evaluate`, `id`)
//! - De-duplication and a total order over rendered features
//! - Salted SHA-256 digests, with an explicitly labelled demo digest
//! - Secure salts and commitment helpers on top of the digest
//!
//! ## Pure function guarantee
//!
//! [`canonicalize`] does no I/O, reads no clock, and has no locale
//! dependence. Digests add exactly two impure inputs: a salt (only when the
//! caller supplies none) and a timestamp (only when asked for).
//!
//! ## Invariants worth knowing
//!
//! - `dna` depends only on the multiset of distinct canonical features
//! - `hash = SHA-256(dna || salt)`; fixed dna and salt give a fixed hash
//! - Normalization rules are constants of [`DNA_FORMAT_VERSION`]
//! - Text arguments are rendered verbatim, not escaped: a string containing
//!   `,`, `(`, `)` or `|` can render like a different set of calls
//!   (`s("a)|t(")` and `s("a"); t()` both give `s(a)|t()`)

mod commitment;
mod config;
mod digest;
mod dna;
mod error;
mod hash;
mod normalize;
mod pipeline;
mod salt;
mod whitespace;

pub use crate::commitment::{
    commit, commit_hash, generate_blinding, verify_commitment, Commitment, BLINDING_BYTES,
};
pub use crate::config::{
    DnaConfig, DEFAULT_DENYLIST, DNA_FORMAT_VERSION, MIN_SALT_BYTES, NUMERIC_PRECISION,
};
pub use crate::digest::{
    build_digest, build_digest_with, DigestOptions, DigestProvider, LocalSha256, Purpose,
};
pub use crate::dna::SonicDna;
pub use crate::error::CanonicalError;
pub use crate::hash::{
    demo_hash, dna_preimage, hash_dna, is_digest_hex, sha256_hex, DigestAlgorithm,
    DIGEST_HEX_LEN,
};
pub use crate::normalize::{normalize_argument, round_to_precision};
pub use crate::pipeline::{canonicalize, render_feature, FEATURE_SEPARATOR};
pub use crate::salt::generate_salt;
pub use crate::whitespace::collapse_whitespace;
