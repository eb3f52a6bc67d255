use std::collections::BTreeSet;

use pattern::FeatureCall;
use tracing::debug;

use crate::config::DnaConfig;
use crate::error::CanonicalError;
use crate::normalize::normalize_argument;

/// Canonical DNA separator between rendered features.
pub const FEATURE_SEPARATOR: char = '|';

/// Main entry point. Takes extracted feature calls and returns the canonical
/// DNA string.
///
/// Denylisted calls are dropped, the rest render as `name(arg1,arg2,...)`,
/// duplicates collapse, and the set is sorted by its full rendered form and
/// joined with `|`. Permutations of the same features produce byte-identical
/// output.
///
/// ```rust
/// use canonical::{canonicalize, DnaConfig};
/// use pattern::{Argument, FeatureCall};
///
/// let features = vec![
///     FeatureCall::new("lpf", vec![Argument::Number(500.0)]),
///     FeatureCall::new("s", vec![Argument::Text("bass".into())]),
///     FeatureCall::new("evaluate", vec![]),
/// ];
/// let dna = canonicalize(&features, &DnaConfig::default()).unwrap();
/// assert_eq!(dna, "lpf(500)|s(bass)");
/// ```
pub fn canonicalize(features: &[FeatureCall], cfg: &DnaConfig) -> Result<String, CanonicalError> {
    cfg.validate()?;

    let rendered: BTreeSet<String> = features
        .iter()
        .filter(|call| !cfg.is_denied(&call.name))
        .map(render_feature)
        .collect();

    if rendered.is_empty() {
        return Err(CanonicalError::NoFeatures);
    }

    debug!(
        input_calls = features.len(),
        distinct_features = rendered.len(),
        "features_canonicalized"
    );

    let mut dna = String::with_capacity(rendered.iter().map(|f| f.len() + 1).sum());
    for feature in &rendered {
        if !dna.is_empty() {
            dna.push(FEATURE_SEPARATOR);
        }
        dna.push_str(feature);
    }
    Ok(dna)
}

/// Renders one call as `name(arg1,arg2,...)`, keeping argument order.
///
/// Text is not escaped, so separators inside a string argument are
/// indistinguishable from real ones:
///
/// ```rust
/// use canonical::render_feature;
/// use pattern::{Argument, FeatureCall};
///
/// let one = FeatureCall::new("f", vec![Argument::Text("a,b".into())]);
/// let two = FeatureCall::new("f", vec![Argument::Text("a".into()), Argument::Text("b".into())]);
/// assert_eq!(render_feature(&one), render_feature(&two));
/// ```
pub fn render_feature(call: &FeatureCall) -> String {
    let args: Vec<String> = call.args.iter().filter_map(normalize_argument).collect();
    format!("{}({})", call.name, args.join(","))
}
