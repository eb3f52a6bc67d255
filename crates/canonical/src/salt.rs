//! Secure random material: DNA salts and commitment blinding factors.
//!
//! Everything here draws from the operating system CSPRNG. There is no
//! fallback generator; if the OS source fails, the caller gets
//! [`CanonicalError::RandomnessUnavailable`].

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CanonicalError;

/// Fresh salt of `bytes` random bytes, hex-encoded (`2 * bytes` chars).
pub fn generate_salt(bytes: usize) -> Result<String, CanonicalError> {
    random_hex(bytes)
}

pub(crate) fn random_hex(bytes: usize) -> Result<String, CanonicalError> {
    let mut buf = vec![0u8; bytes];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|err| CanonicalError::RandomnessUnavailable(err.to_string()))?;
    Ok(hex::encode(buf))
}
