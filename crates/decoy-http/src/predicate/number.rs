//! Decimal equality on the textual form of numbers.
//!
//! Numbers are compared as exact decimals, never as binary floating point:
//! `1`, `1.0`, `1.00` and `1e0` are all equal, and no digits are lost for
//! values wider than `f64`.

/// Canonical decimal: `(-1)^negative * digits * 10^exponent`, with no leading
/// or trailing zeros in `digits`. Zero is `digits == ""`, never negative.
#[derive(Debug, PartialEq, Eq)]
struct CanonicalDecimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl CanonicalDecimal {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = unsigned[pos + 1..].parse().ok()?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let mut digits = format!("{int_part}{frac_part}");
        let mut exponent = exponent.checked_sub(i64::try_from(frac_part.len()).ok()?)?;

        let trailing = digits.len() - digits.trim_end_matches('0').len();
        digits.truncate(digits.len() - trailing);
        exponent = exponent.checked_add(i64::try_from(trailing).ok()?)?;
        let digits = digits.trim_start_matches('0').to_string();

        if digits.is_empty() {
            return Some(CanonicalDecimal {
                negative: false,
                digits,
                exponent: 0,
            });
        }

        Some(CanonicalDecimal {
            negative,
            digits,
            exponent,
        })
    }
}

/// Whether two numeric strings denote the same decimal value.
///
/// Text that is not a decimal number only equals identical text.
pub fn decimal_eq(a: &str, b: &str) -> bool {
    match (CanonicalDecimal::parse(a), CanonicalDecimal::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_representation_independent() {
        assert!(decimal_eq("1", "1.0"));
        assert!(decimal_eq("1", "1.00"));
        assert!(decimal_eq("100", "1e2"));
        assert!(decimal_eq("0.5", "5E-1"));
        assert!(decimal_eq("-0", "0.000"));
        assert!(decimal_eq("007", "7"));
    }

    #[test]
    fn test_different_values() {
        assert!(!decimal_eq("1", "1.0000000000000000001"));
        assert!(!decimal_eq("-1", "1"));
        assert!(!decimal_eq("10", "1"));
    }

    #[test]
    fn test_beyond_f64_precision() {
        assert!(!decimal_eq("9007199254740993", "9007199254740992"));
        assert!(decimal_eq(
            "12345678901234567890.10",
            "12345678901234567890.1"
        ));
    }

    #[test]
    fn test_non_numeric_text() {
        assert!(decimal_eq("abc", "abc"));
        assert!(!decimal_eq("abc", "1"));
        assert!(!decimal_eq(".", "0"));
    }

    proptest! {
        #[test]
        fn test_trailing_zeros_never_matter(n in any::<i64>(), zeros in 0usize..6) {
            let padded = format!("{n}.{}", "0".repeat(zeros));
            let plain = n.to_string();
            prop_assert!(decimal_eq(&plain, &padded));
        }
    }
}
