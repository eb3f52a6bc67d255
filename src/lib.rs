//! Workspace umbrella crate for Sonic DNA.
//!
//! This crate stitches the parser front end (`pattern`), the canonicalizer and
//! digest builder (`canonical`), and the prompt-to-pattern generator (`agent`)
//! together so callers can go from pattern source to a salted fingerprint with
//! a single call.
//!
//! ```text
//! source ──validate──▶ parse ──▶ extract calls ──▶ canonicalize ──▶ digest ──▶ SonicDna
//! ```
//!
//! ```
//! use sonic_dna::{extract_dna, ExtractOptions};
//!
//! let a = extract_dna(r#"s("bass").lpf(500)"#, &ExtractOptions::default().with_salt("x")).unwrap();
//! let b = extract_dna(r#"s('bass')  .lpf(500.0)"#, &ExtractOptions::default().with_salt("x")).unwrap();
//! assert_eq!(a.dna, "lpf(500)|s(bass)");
//! assert_eq!(a.hash, b.hash);
//! ```

mod config;

pub use crate::config::{
    ConfigLoadError, GeneratorYamlConfig, LoggingYamlConfig, SUPPORTED_CONFIG_VERSION,
    SonicConfig,
};

pub use agent::{
    CachedGenerator, GeneratedPattern, GeneratorError, PatternGenerator, PromptCache,
    TemplateGenerator,
};
pub use canonical::{
    BLINDING_BYTES, CanonicalError, Commitment, DNA_FORMAT_VERSION, DigestAlgorithm,
    DigestOptions, DigestProvider, DnaConfig, LocalSha256, NUMERIC_PRECISION, Purpose, SonicDna,
    canonicalize, commit, generate_blinding, generate_salt, verify_commitment,
};
pub use pattern::{
    Argument, DEFAULT_MAX_SOURCE_CHARS, FeatureCall, PatternError, extract_features,
    parse_pattern,
};

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{Instrument, Level, info, warn};

/// Per-call extraction options: salt, timestamp, digest purpose, and
/// provider fallback.
pub type ExtractOptions = DigestOptions;

/// Errors that can occur while turning pattern source into a [`SonicDna`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnaError {
    #[error("pattern rejected: {0}")]
    Pattern(#[from] PatternError),
    #[error("canonicalization failure: {0}")]
    Canonical(#[from] CanonicalError),
}

/// Coarse failure class, stable across error message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Empty, oversized, or featureless source; malformed hex.
    InvalidInput,
    /// Source does not parse.
    Syntax,
    /// No SHA-256 could be obtained.
    DigestUnavailable,
    /// The OS CSPRNG failed.
    RandomnessUnavailable,
    /// The supplied [`DnaConfig`] is invalid.
    Config,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::Syntax => "syntax",
            FailureKind::DigestUnavailable => "digest_unavailable",
            FailureKind::RandomnessUnavailable => "randomness_unavailable",
            FailureKind::Config => "config",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DnaError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DnaError::Pattern(err) if err.is_invalid_input() => FailureKind::InvalidInput,
            DnaError::Pattern(_) => FailureKind::Syntax,
            DnaError::Canonical(err) => match err {
                CanonicalError::InvalidConfig(_) => FailureKind::Config,
                CanonicalError::NoFeatures | CanonicalError::InvalidHex(_) => {
                    FailureKind::InvalidInput
                }
                CanonicalError::DigestUnavailable(_) => FailureKind::DigestUnavailable,
                CanonicalError::RandomnessUnavailable(_) => FailureKind::RandomnessUnavailable,
            },
        }
    }
}

/// Metrics observer for extraction outcomes.
pub trait DnaMetrics: Send + Sync {
    fn record_extract(&self, latency: Duration, result: Result<(), FailureKind>);
}

/// Install or clear the global extraction metrics recorder.
pub fn set_dna_metrics(recorder: Option<Arc<dyn DnaMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DnaMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn DnaMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn DnaMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Runs the front half of the pipeline: validate, parse, extract, and
/// canonicalize. No salt or randomness is involved, so the result depends
/// only on `source` and `cfg`.
pub fn canonical_dna(source: &str, cfg: &DnaConfig) -> Result<String, DnaError> {
    cfg.validate()?;
    pattern::validate_source(source, cfg.max_source_chars)?;
    let tree = parse_pattern(source)?;
    let features = extract_features(&tree);
    Ok(canonicalize(&features, cfg)?)
}

/// Extract a [`SonicDna`] with the default [`DnaConfig`].
pub fn extract_dna(source: &str, opts: &ExtractOptions) -> Result<SonicDna, DnaError> {
    extract_dna_with_config(source, &DnaConfig::default(), opts)
}

/// Extract a [`SonicDna`] with explicit configuration, hashing locally.
pub fn extract_dna_with_config(
    source: &str,
    cfg: &DnaConfig,
    opts: &ExtractOptions,
) -> Result<SonicDna, DnaError> {
    let span = tracing::span!(
        Level::INFO,
        "sonic_dna.extract",
        source_chars = source.chars().count()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let result = canonical_dna(source, cfg)
        .and_then(|dna| canonical::build_digest(dna, cfg, opts).map_err(DnaError::from));

    record_outcome(&result, start.elapsed());
    result
}

/// Async variant of [`extract_dna`] using the in-process SHA-256 provider.
pub async fn extract_dna_async(source: &str, opts: &ExtractOptions) -> Result<SonicDna, DnaError> {
    extract_dna_with_provider(source, &DnaConfig::default(), opts, &LocalSha256).await
}

/// Extract a [`SonicDna`], asking `provider` for the SHA-256.
///
/// Produces the same `dna` as [`extract_dna_with_config`] and, for the same
/// salt, the same `hash`. Provider failures fall back to local hashing unless
/// `opts.local_fallback` is off.
pub async fn extract_dna_with_provider(
    source: &str,
    cfg: &DnaConfig,
    opts: &ExtractOptions,
    provider: &dyn DigestProvider,
) -> Result<SonicDna, DnaError> {
    let span = tracing::span!(
        Level::INFO,
        "sonic_dna.extract",
        source_chars = source.chars().count(),
        provider = provider.name()
    );

    async move {
        let start = Instant::now();
        let result = match canonical_dna(source, cfg) {
            Ok(dna) => canonical::build_digest_with(dna, cfg, opts, provider)
                .await
                .map_err(DnaError::from),
            Err(err) => Err(err),
        };
        record_outcome(&result, start.elapsed());
        result
    }
    .instrument(span)
    .await
}

/// Extract many sources in parallel. Results come back in input order and
/// each source succeeds or fails on its own.
///
/// With `opts.salt` unset every record gets its own fresh salt.
pub fn extract_dna_batch(
    sources: &[&str],
    cfg: &DnaConfig,
    opts: &ExtractOptions,
) -> Vec<Result<SonicDna, DnaError>> {
    sources
        .par_iter()
        .map(|source| extract_dna_with_config(source, cfg, opts))
        .collect()
}

/// Re-derives the DNA of `source` with the salt and digest path stored in
/// `registered`, and reports whether it proves the same vibe.
///
/// This is the recovery check: the registered record's hash is the
/// commitment, `source` is the candidate. Records built with the demo digest
/// cannot back recovery and fail with [`CanonicalError::DigestUnavailable`].
pub fn verify_recovery(
    source: &str,
    registered: &SonicDna,
    cfg: &DnaConfig,
) -> Result<bool, DnaError> {
    if !registered.algorithm.is_secure() {
        warn!(
            algorithm = registered.algorithm.as_str(),
            "recovery_rejected_insecure_digest"
        );
        return Err(CanonicalError::DigestUnavailable(format!(
            "{} digest cannot back recovery",
            registered.algorithm
        ))
        .into());
    }
    let opts = ExtractOptions::default().with_salt(registered.salt.clone());
    let candidate = extract_dna_with_config(source, cfg, &opts)?;
    Ok(candidate.same_vibe(registered))
}

fn record_outcome(result: &Result<SonicDna, DnaError>, elapsed: Duration) {
    let elapsed_micros = elapsed.as_micros() as u64;
    match result {
        Ok(record) => {
            info!(
                feature_count = record.feature_count(),
                algorithm = record.algorithm.as_str(),
                timestamped = record.has_timestamp(),
                elapsed_micros,
                "dna_extracted"
            );
            if let Some(recorder) = metrics_recorder() {
                recorder.record_extract(elapsed, Ok(()));
            }
        }
        Err(err) => {
            // Error messages can quote source text; only the class is logged.
            let kind = err.kind();
            warn!(kind = kind.as_str(), elapsed_micros, "dna_failure");
            if let Some(recorder) = metrics_recorder() {
                recorder.record_extract(elapsed, Err(kind));
            }
        }
    }
}
