//! Decoding of JavaScript literal tokens into values.

/// Parses a `number` token: decimal/exponent, `0x`/`0o`/`0b` integers,
/// `_` separators, and a trailing BigInt `n`. Non-finite results are rejected.
pub(crate) fn parse_number_literal(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let cleaned = cleaned.to_ascii_lowercase();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    let radix_digits = if let Some(digits) = cleaned.strip_prefix("0x") {
        Some((16, digits))
    } else if let Some(digits) = cleaned.strip_prefix("0o") {
        Some((8, digits))
    } else if let Some(digits) = cleaned.strip_prefix("0b") {
        Some((2, digits))
    } else {
        None
    };

    let value = match radix_digits {
        Some((radix, digits)) => u128::from_str_radix(digits, radix).ok()? as f64,
        None => cleaned.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Decodes a quoted `string` token (either quote style) into its value.
pub(crate) fn decode_string_literal(raw: &str) -> String {
    let mut chars = raw.chars();
    let body = match chars.next() {
        Some(quote @ ('"' | '\'')) => {
            let rest = chars.as_str();
            rest.strip_suffix(quote).unwrap_or(rest)
        }
        _ => raw,
    };
    unescape(body)
}

/// First static segment of a `template_string` token: everything after the
/// opening backtick up to the first `${` or the closing backtick.
pub(crate) fn first_template_segment(raw: &str) -> String {
    let body = raw.strip_prefix('`').unwrap_or(raw);
    let bytes = body.as_bytes();
    let mut end = bytes.len();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => {
                end = i;
                break;
            }
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                end = i;
                break;
            }
            _ => i += 1,
        }
    }
    unescape(&body[..end])
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => match read_hex(&mut chars, 2) {
                Some(decoded) => out.push(decoded),
                None => out.push('x'),
            },
            Some('u') => {
                let decoded = if chars.peek() == Some(&'{') {
                    chars.next();
                    let digits: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&digits, 16)
                        .ok()
                        .and_then(char::from_u32)
                } else {
                    read_hex(&mut chars, 4)
                };
                out.push(decoded.unwrap_or('\u{fffd}'));
            }
            // Line continuations vanish.
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn read_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, len: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..len {
        let digit = chars.peek()?.to_digit(16)?;
        chars.next();
        value = value * 16 + digit;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_forms() {
        assert_eq!(parse_number_literal("500"), Some(500.0));
        assert_eq!(parse_number_literal("0.25"), Some(0.25));
        assert_eq!(parse_number_literal(".5"), Some(0.5));
        assert_eq!(parse_number_literal("1e3"), Some(1000.0));
        assert_eq!(parse_number_literal("0xFF"), Some(255.0));
        assert_eq!(parse_number_literal("0o17"), Some(15.0));
        assert_eq!(parse_number_literal("0b101"), Some(5.0));
        assert_eq!(parse_number_literal("1_000"), Some(1000.0));
        assert_eq!(parse_number_literal("10n"), Some(10.0));
        assert_eq!(parse_number_literal("1e400"), None);
    }

    #[test]
    fn strings_drop_quotes_and_decode_escapes() {
        assert_eq!(decode_string_literal(r#""bass""#), "bass");
        assert_eq!(decode_string_literal("'bass'"), "bass");
        assert_eq!(decode_string_literal(r#""it\'s""#), "it's");
        assert_eq!(decode_string_literal(r#""a\tb""#), "a\tb");
        assert_eq!(decode_string_literal(r#""\x41B\u{43}""#), "ABC");
        assert_eq!(decode_string_literal(r#""""#), "");
    }

    #[test]
    fn template_takes_first_static_segment() {
        assert_eq!(first_template_segment("`bd sd`"), "bd sd");
        assert_eq!(first_template_segment("`bd ${x} sd`"), "bd ");
        assert_eq!(first_template_segment("`${x}`"), "");
        assert_eq!(first_template_segment(r"`a\`b`"), "a`b");
        assert_eq!(first_template_segment("`costs $5`"), "costs $5");
    }
}
