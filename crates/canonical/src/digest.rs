//! Digest builder: canonical DNA string to [`SonicDna`] record.
//!
//! Two entry points share every rule except where the SHA-256 comes from:
//!
//! - [`build_digest`] hashes locally and never suspends.
//! - [`build_digest_with`] asks a [`DigestProvider`] (possibly remote) and
//!   falls back to the local hash if the provider fails or answers with
//!   something that is not a digest.
//!
//! Both return byte-identical records for the same DNA and salt.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DnaConfig;
use crate::dna::SonicDna;
use crate::error::CanonicalError;
use crate::hash::{demo_hash, dna_preimage, hash_dna, is_digest_hex, sha256_hex, DigestAlgorithm};
use crate::salt::generate_salt;

/// What the resulting hash will be used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Registration, recovery, or on-chain commitment. Always SHA-256.
    #[default]
    Commitment,
    /// Offline demos only. Uses the non-cryptographic demo digest.
    Demo,
}

/// Per-call options for building a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOptions {
    /// Salt to reuse. `None` generates a fresh one from the OS CSPRNG.
    pub salt: Option<String>,
    /// Stamp the record with the current time.
    pub include_timestamp: bool,
    pub purpose: Purpose,
    /// Fall back to local SHA-256 when a provider fails. Only affects
    /// [`build_digest_with`].
    pub local_fallback: bool,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            salt: None,
            include_timestamp: false,
            purpose: Purpose::Commitment,
            local_fallback: true,
        }
    }
}

impl DigestOptions {
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn with_timestamp(mut self) -> Self {
        self.include_timestamp = true;
        self
    }

    pub fn demo(mut self) -> Self {
        self.purpose = Purpose::Demo;
        self
    }

    pub fn without_local_fallback(mut self) -> Self {
        self.local_fallback = false;
        self
    }
}

/// Source of SHA-256 digests for the async path.
#[async_trait]
pub trait DigestProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Lowercase hex SHA-256 of `data`.
    async fn sha256_hex(&self, data: &[u8]) -> Result<String, CanonicalError>;
}

/// In-process SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSha256;

#[async_trait]
impl DigestProvider for LocalSha256 {
    fn name(&self) -> &str {
        "local-sha256"
    }

    async fn sha256_hex(&self, data: &[u8]) -> Result<String, CanonicalError> {
        Ok(sha256_hex(data))
    }
}

/// Builds the record for `dna` with a locally computed digest.
pub fn build_digest(
    dna: String,
    cfg: &DnaConfig,
    opts: &DigestOptions,
) -> Result<SonicDna, CanonicalError> {
    let salt = resolve_salt(cfg, opts)?;
    let (hash, algorithm) = match opts.purpose {
        Purpose::Commitment => (hash_dna(&dna, &salt), DigestAlgorithm::Sha256),
        Purpose::Demo => (demo_hash(&dna, &salt), DigestAlgorithm::DemoFx),
    };
    Ok(assemble(dna, hash, salt, algorithm, cfg, opts))
}

/// Builds the record for `dna`, asking `provider` for the SHA-256.
///
/// A failed or malformed provider answer falls back to [`hash_dna`] when
/// `opts.local_fallback` is set, which yields the same bytes a healthy
/// provider would have. Without the fallback the call fails with
/// [`CanonicalError::DigestUnavailable`]; a weaker digest is never
/// substituted.
pub async fn build_digest_with(
    dna: String,
    cfg: &DnaConfig,
    opts: &DigestOptions,
    provider: &dyn DigestProvider,
) -> Result<SonicDna, CanonicalError> {
    let salt = resolve_salt(cfg, opts)?;
    if opts.purpose == Purpose::Demo {
        let hash = demo_hash(&dna, &salt);
        return Ok(assemble(dna, hash, salt, DigestAlgorithm::DemoFx, cfg, opts));
    }

    let answer = match provider.sha256_hex(&dna_preimage(&dna, &salt)).await {
        Ok(hash) => {
            let hash = hash.to_ascii_lowercase();
            if is_digest_hex(&hash) {
                Ok(hash)
            } else {
                Err(CanonicalError::DigestUnavailable(format!(
                    "provider {} returned a malformed digest",
                    provider.name()
                )))
            }
        }
        Err(err) => Err(err),
    };

    let hash = match answer {
        Ok(hash) => hash,
        Err(err) if opts.local_fallback => {
            warn!(provider = provider.name(), error = %err, "digest_provider_fallback");
            hash_dna(&dna, &salt)
        }
        Err(err) => return Err(err),
    };
    Ok(assemble(dna, hash, salt, DigestAlgorithm::Sha256, cfg, opts))
}

fn resolve_salt(cfg: &DnaConfig, opts: &DigestOptions) -> Result<String, CanonicalError> {
    cfg.validate()?;
    match &opts.salt {
        Some(salt) => Ok(salt.clone()),
        None => generate_salt(cfg.salt_bytes),
    }
}

fn assemble(
    dna: String,
    hash: String,
    salt: String,
    algorithm: DigestAlgorithm,
    cfg: &DnaConfig,
    opts: &DigestOptions,
) -> SonicDna {
    let timestamp = if opts.include_timestamp {
        Utc::now().timestamp_millis()
    } else {
        0
    };
    SonicDna {
        dna,
        hash,
        salt,
        timestamp,
        version: cfg.version,
        algorithm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DIGEST_HEX_LEN;

    struct FailingProvider;

    #[async_trait]
    impl DigestProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn sha256_hex(&self, _data: &[u8]) -> Result<String, CanonicalError> {
            Err(CanonicalError::DigestUnavailable("offline".into()))
        }
    }

    struct GarbageProvider;

    #[async_trait]
    impl DigestProvider for GarbageProvider {
        fn name(&self) -> &str {
            "garbage"
        }

        async fn sha256_hex(&self, _data: &[u8]) -> Result<String, CanonicalError> {
            Ok("not-a-digest".into())
        }
    }

    struct UppercaseProvider;

    #[async_trait]
    impl DigestProvider for UppercaseProvider {
        fn name(&self) -> &str {
            "uppercase"
        }

        async fn sha256_hex(&self, data: &[u8]) -> Result<String, CanonicalError> {
            Ok(sha256_hex(data).to_ascii_uppercase())
        }
    }

    fn dna() -> String {
        "lpf(500)|s(bass)".to_string()
    }

    #[test]
    fn explicit_salt_is_kept() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x");
        let out = build_digest(dna(), &cfg, &opts).unwrap();
        assert_eq!(out.salt, "x");
        assert_eq!(out.hash, hash_dna("lpf(500)|s(bass)", "x"));
        assert_eq!(out.algorithm, DigestAlgorithm::Sha256);
        assert_eq!(out.timestamp, 0);
        assert!(!out.has_timestamp());
    }

    #[test]
    fn generated_salt_has_configured_size() {
        let cfg = DnaConfig {
            salt_bytes: 32,
            ..Default::default()
        };
        let out = build_digest(dna(), &cfg, &DigestOptions::default()).unwrap();
        assert_eq!(out.salt.len(), 64);
        assert_eq!(out.hash.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn timestamp_only_when_requested() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x").with_timestamp();
        let out = build_digest(dna(), &cfg, &opts).unwrap();
        assert!(out.timestamp > 0);
    }

    #[test]
    fn demo_purpose_is_labelled() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x").demo();
        let out = build_digest(dna(), &cfg, &opts).unwrap();
        assert_eq!(out.algorithm, DigestAlgorithm::DemoFx);
        assert_eq!(out.hash, demo_hash("lpf(500)|s(bass)", "x"));
    }

    #[tokio::test]
    async fn provider_path_matches_local_path() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x");
        let local = build_digest(dna(), &cfg, &opts).unwrap();
        let remote = build_digest_with(dna(), &cfg, &opts, &LocalSha256).await.unwrap();
        assert_eq!(local, remote);
    }

    #[tokio::test]
    async fn failing_provider_falls_back_to_local_sha256() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x");
        let out = build_digest_with(dna(), &cfg, &opts, &FailingProvider).await.unwrap();
        assert_eq!(out.hash, hash_dna("lpf(500)|s(bass)", "x"));
        assert_eq!(out.algorithm, DigestAlgorithm::Sha256);
    }

    #[tokio::test]
    async fn malformed_answer_without_fallback_fails_loudly() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x").without_local_fallback();
        let err = build_digest_with(dna(), &cfg, &opts, &GarbageProvider).await.unwrap_err();
        assert!(matches!(err, CanonicalError::DigestUnavailable(_)));

        let err = build_digest_with(dna(), &cfg, &opts, &FailingProvider).await.unwrap_err();
        assert!(matches!(err, CanonicalError::DigestUnavailable(_)));
    }

    #[tokio::test]
    async fn uppercase_answer_is_accepted_and_lowercased() {
        let cfg = DnaConfig::default();
        let opts = DigestOptions::default().with_salt("x").without_local_fallback();
        let out = build_digest_with(dna(), &cfg, &opts, &UppercaseProvider).await.unwrap();
        assert_eq!(out.hash, hash_dna("lpf(500)|s(bass)", "x"));
    }

    #[test]
    fn invalid_config_rejected_before_salt() {
        let cfg = DnaConfig {
            salt_bytes: 4,
            ..Default::default()
        };
        let err = build_digest(dna(), &cfg, &DigestOptions::default()).unwrap_err();
        assert!(matches!(err, CanonicalError::InvalidConfig(_)));
    }
}
