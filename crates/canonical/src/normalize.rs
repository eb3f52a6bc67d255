//! Argument normalization: one literal argument to its canonical text.

use pattern::Argument;

use crate::config::NUMERIC_PRECISION;

/// Canonical text for one argument, or `None` when it has no literal value.
///
/// - Numbers round to [`NUMERIC_PRECISION`] decimal places and render without
///   a trailing `.0` (`500`, `0.5`, `-2.3`).
/// - Text is lowercased, then trimmed.
/// - Booleans render as `true` / `false`.
///
/// ```rust
/// use canonical::normalize_argument;
/// use pattern::Argument;
///
/// assert_eq!(normalize_argument(&Argument::Number(0.54)).as_deref(), Some("0.5"));
/// assert_eq!(normalize_argument(&Argument::Text("  Bass ".into())).as_deref(), Some("bass"));
/// assert_eq!(normalize_argument(&Argument::Unsupported), None);
/// ```
pub fn normalize_argument(arg: &Argument) -> Option<String> {
    match arg {
        Argument::Number(value) => Some(render_number(round_to_precision(*value))),
        Argument::Text(text) => Some(text.to_lowercase().trim().to_string()),
        Argument::Bool(flag) => Some(flag.to_string()),
        Argument::Unsupported => None,
    }
}

/// Rounds half away from zero to [`NUMERIC_PRECISION`] decimal places.
///
/// Magnitudes at or above `2^52 / 10^NUMERIC_PRECISION` carry no digits at
/// that precision and are returned unchanged, so scaling never overflows.
pub fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(NUMERIC_PRECISION as i32);
    let scaled = value * factor;
    if value.abs() >= 2f64.powi(52) / factor || !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // -0.04 rounds to -0; it must render like 0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn render_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> String {
        normalize_argument(&Argument::Number(value)).unwrap()
    }

    #[test]
    fn integers_render_without_fraction() {
        assert_eq!(num(500.0), "500");
        assert_eq!(num(2.0), "2");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn jitter_collapses_within_one_decimal() {
        assert_eq!(num(500.01), num(500.04));
        assert_eq!(num(0.51), "0.5");
        assert_eq!(num(0.54), "0.5");
        assert_eq!(num(0.3), "0.3");
    }

    #[test]
    fn steps_larger_than_precision_stay_distinct() {
        assert_ne!(num(500.0), num(501.0));
        assert_ne!(num(0.5), num(0.6));
        assert_eq!(num(0.55), "0.6");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        assert_eq!(num(-0.04), "0");
        assert_eq!(num(-0.5), "-0.5");
    }

    #[test]
    fn huge_magnitudes_do_not_overflow() {
        let a = num(2e307);
        let b = num(9e307);
        assert_ne!(a, b);
        assert!(!a.contains("inf") && !b.contains("inf"));
        assert!(num(-2e307).starts_with('-'));
        assert_eq!(round_to_precision(1e300), 1e300);
        assert_eq!(round_to_precision(f64::MAX), f64::MAX);
    }

    #[test]
    fn text_is_lowercased_then_trimmed() {
        let arg = Argument::Text("\t BD*4 SD \n".into());
        assert_eq!(normalize_argument(&arg).unwrap(), "bd*4 sd");
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let arg = Argument::Text("bd  sd".into());
        assert_eq!(normalize_argument(&arg).unwrap(), "bd  sd");
    }

    #[test]
    fn booleans_pass_through() {
        assert_eq!(normalize_argument(&Argument::Bool(true)).unwrap(), "true");
        assert_eq!(normalize_argument(&Argument::Bool(false)).unwrap(), "false");
    }
}
