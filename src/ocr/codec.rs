//! Conversion between absolute values and the game's abbreviated notation.
//!
//! The summary screen shows large quantities as `12.34M`, `1.05T`, etc.
//! `decode` turns such (possibly noisy) OCR tokens into absolute values and
//! `encode` renders absolute values back into the same notation.

use regex::Regex;
use std::sync::LazyLock;

/// Numeric prefix of a token; an exponent needs at least one digit.
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?")
        .expect("number prefix pattern is valid")
});

/// Suffixes used when encoding, indexed by power of 1000 minus one.
const ENCODE_SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Units recognized when decoding, with their power of 1000.
/// Lowercase `q` is quadrillion, uppercase `Q` is quintillion.
const DECODE_UNITS: [(char, i32); 6] = [
    ('K', 1),
    ('M', 2),
    ('B', 3),
    ('T', 4),
    ('q', 5),
    ('Q', 6),
];

/// Encodes an absolute value into abbreviated notation with 2 decimals.
///
/// Values below 1000 are formatted without a suffix. Larger values are
/// scaled by the largest supported power of 1000 (up to `T`).
pub fn encode(value: f64) -> String {
    if value < 1000.0 {
        return format!("{:.2}", value);
    }

    // Stepping instead of log1000 keeps exact powers (1e6, 1e9) on the right suffix.
    let mut exp = 1;
    while exp < ENCODE_SUFFIXES.len() && value >= 1000f64.powi(exp as i32 + 1) {
        exp += 1;
    }

    format!(
        "{:.2}{}",
        value / 1000f64.powi(exp as i32),
        ENCODE_SUFFIXES[exp - 1]
    )
}

/// Decodes an abbreviated or plain numeric token into an absolute value.
///
/// A leading `$` is dropped and the first `,` is read as a decimal point.
/// Returns `None` when no leading number can be parsed.
pub fn decode(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let without_dollar = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let normalized = without_dollar.replacen(',', ".", 1);

    let base = leading_number(&normalized)?;

    match DECODE_UNITS.iter().find(|(unit, _)| normalized.contains(*unit)) {
        Some(&(_, power)) => Some((base * 1000f64.powi(power)).round()),
        None => Some(base),
    }
}

/// Parses the longest numeric prefix (`[+-]digits[.digits][e[+-]digits]`).
fn leading_number(text: &str) -> Option<f64> {
    NUMBER_PREFIX.find(text)?.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_below_thousand() {
        assert_eq!(encode(0.0), "0.00");
        assert_eq!(encode(12.5), "12.50");
        assert_eq!(encode(999.99), "999.99");
    }

    #[test]
    fn test_encode_suffixes() {
        assert_eq!(encode(1000.0), "1.00K");
        assert_eq!(encode(500_000.0), "500.00K");
        assert_eq!(encode(1_000_000.0), "1.00M");
        assert_eq!(encode(12_340_000.0), "12.34M");
        assert_eq!(encode(1_230_000_000.0), "1.23B");
        assert_eq!(encode(4_500_000_000_000.0), "4.50T");
    }

    #[test]
    fn test_encode_clamps_to_trillions() {
        assert_eq!(encode(2e15), "2000.00T");
    }

    #[test]
    fn test_decode_plain_and_suffixed() {
        assert_eq!(decode("123.45"), Some(123.45));
        assert_eq!(decode("500.00K"), Some(500_000.0));
        assert_eq!(decode("$12.34M"), Some(12_340_000.0));
        assert_eq!(decode("1.5B"), Some(1_500_000_000.0));
        assert_eq!(decode("2T"), Some(2e12));
        assert_eq!(decode("3q"), Some(3e15));
        assert_eq!(decode("3Q"), Some(3e18));
    }

    #[test]
    fn test_decode_comma_as_decimal_point() {
        assert_eq!(decode("$1,23B"), Some(1_230_000_000.0));
        assert_eq!(decode("4,5K"), Some(4500.0));
    }

    #[test]
    fn test_decode_unit_is_case_sensitive() {
        // Lowercase k is not a unit, so the base is returned as-is.
        assert_eq!(decode("5k"), Some(5.0));
    }

    #[test]
    fn test_decode_garbage_is_none() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("$"), None);
        assert_eq!(decode("abc"), None);
        assert_eq!(decode("K"), None);
        assert_eq!(decode("."), None);
    }

    #[test]
    fn test_leading_number_stops_at_noise() {
        assert_eq!(leading_number("12.5xyz"), Some(12.5));
        assert_eq!(leading_number("7e"), Some(7.0));
        assert_eq!(leading_number("1e3B"), Some(1000.0));
        assert_eq!(leading_number("-4"), Some(-4.0));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("12.K"), Some(12.0));
        assert_eq!(leading_number("+.x"), None);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let samples = [
            1000.0,
            1234.5678,
            999_999.0,
            1_000_001.0,
            87_654_321.0,
            3.21e11,
            9.99e12,
            5.5e14,
        ];
        for v in samples {
            let decoded = decode(&encode(v)).unwrap();
            assert!(
                (decoded - v).abs() / v < 0.005,
                "{} encoded as {} decoded to {}",
                v,
                encode(v),
                decoded
            );
        }
    }

    #[test]
    fn test_sub_thousand_passthrough() {
        for v in [0.0, 0.004, 1.0, 42.42, 999.0] {
            let decoded = decode(&encode(v)).unwrap();
            assert!((decoded - v).abs() <= 0.01, "{} -> {}", v, decoded);
        }
    }
}
