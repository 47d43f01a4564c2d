//! Numeric folding and escape-encoding primitives for token cooking.
//!
//! `mv` is the single integer-folding primitive: digit-by-digit Horner
//! folding shared by integer cooking, float part cooking, and `\u{…}`
//! escape cooking (base 16). Arithmetic wraps rather than panics; overflow
//! of pathological literals is a validator concern, not a lexer one.

use crate::tables::{digit_value, SEPARATOR};

/// Fixed escape table for string literals: `\` + key → code point.
pub const STRING_ESCAPES: &[(char, u32)] = &[
    ('\'', 0x27),
    ('\\', 0x5C),
    ('t', 0x09),
    ('n', 0x0A),
    ('r', 0x0D),
    ('s', 0x20),
    ('%', 0x25),
];

/// Mathematical value of a digit string in the given radix.
///
/// Recursive Horner folding: `mv(text) = radix * mv(rest) + mv(last)`,
/// stripping a single trailing numeric separator first. Interior separators
/// vanish through the recursion; *validating* separator placement is the
/// lexer's job, not this function's. `mv("") == 0` (empty `\u{}` hex).
pub fn mv(text: &str, radix: u32) -> i64 {
    let text = text.strip_suffix(SEPARATOR).unwrap_or(text);
    let mut chars = text.chars();
    let Some(last) = chars.next_back() else {
        return 0;
    };
    let rest = chars.as_str();
    let digit = i64::from(digit_value(last).unwrap_or(0));
    if rest.is_empty() {
        digit
    } else {
        mv(rest, radix)
            .wrapping_mul(i64::from(radix))
            .wrapping_add(digit)
    }
}

/// Mathematical value of an unsigned float literal `whole.frac(e[+-]?digits)?`.
///
/// Splits on the decimal point and exponent marker and combines the parts
/// with the same integer-folding primitive.
#[allow(clippy::cast_precision_loss)]
pub fn float_value(text: &str) -> f64 {
    let (mantissa, exponent) = match text.split_once('e') {
        Some((m, e)) => (m, e),
        None => (text, ""),
    };
    let (whole, frac) = match mantissa.split_once('.') {
        Some((w, f)) => (w, f),
        None => (mantissa, ""),
    };
    let whole_value = mv(whole, 10) as f64;
    let frac_len = frac.chars().filter(char::is_ascii_digit).count();
    let frac_value = mv(frac, 10) as f64 / 10f64.powi(exponent_i32(frac_len));
    let exp_value = match exponent.strip_prefix('-') {
        Some(e) => -mv(e, 10),
        None => mv(exponent.strip_prefix('+').unwrap_or(exponent), 10),
    };
    (whole_value + frac_value) * 10f64.powf(exp_value as f64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn exponent_i32(len: usize) -> i32 {
    len.min(i32::MAX as usize) as i32
}

/// Look up the fixed code point for a string escape key.
pub fn escape_code(key: char) -> Option<u32> {
    STRING_ESCAPES
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, code)| code)
}

/// UTF-8-encode a code point into `out`.
///
/// Code points outside the Unicode scalar range encode as U+FFFD; the lexer
/// validated escape *shape* already, and replacement is the total fallback
/// for out-of-range `\u{…}` values.
pub fn encode_code_point(code: u32, out: &mut Vec<u8>) {
    let c = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Cook a string literal body (delimiters already stripped) into UTF-8
/// code units, applying the escape rules.
///
/// Mapping, in order: `\` + escape key → fixed code point; `\u{hex}` →
/// code point (empty hex defaults to 0); `\` + line feed → a single space
/// (line continuation); `\` + any other char → that char itself (identity
/// escape); unescaped text → its own code units.
pub fn cook_string_body(body: &str) -> Vec<u8> {
    let chars: Vec<char> = body.chars().collect();
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            encode_code_point(chars[i] as u32, &mut out);
            i += 1;
            continue;
        }
        let key = chars[i + 1];
        if let Some(code) = escape_code(key) {
            encode_code_point(code, &mut out);
            i += 2;
        } else if key == 'u' && chars.get(i + 2) == Some(&'{') {
            let mut j = i + 3;
            let mut hex = String::new();
            while j < chars.len() && chars[j] != '}' {
                hex.push(chars[j]);
                j += 1;
            }
            #[allow(clippy::cast_sign_loss)]
            let code = mv(&hex, 16) as u32;
            encode_code_point(code, &mut out);
            i = j + 1;
        } else if key == '\n' {
            // Line continuation: escaped line feed cooks to one space.
            out.push(b' ');
            i += 2;
        } else {
            // Identity escape.
            encode_code_point(key as u32, &mut out);
            i += 2;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // === Integer Folding ===

    #[test]
    fn mv_single_digit_is_its_value() {
        assert_eq!(mv("7", 10), 7);
        assert_eq!(mv("f", 16), 15);
        assert_eq!(mv("z", 36), 35);
        assert_eq!(mv("1", 2), 1);
    }

    #[test]
    fn mv_is_horner_folding() {
        assert_eq!(mv("123", 10), 100 + 20 + 3);
        assert_eq!(mv("1f", 16), 31);
        assert_eq!(mv("1F", 16), 31);
        assert_eq!(mv("101", 2), 5);
    }

    #[test]
    fn mv_strips_separators() {
        assert_eq!(mv("1_000", 10), 1000);
        assert_eq!(mv("12_", 10), 12);
        assert_eq!(mv("ff_ff", 16), 0xFFFF);
    }

    #[test]
    fn mv_empty_is_zero() {
        assert_eq!(mv("", 10), 0);
        assert_eq!(mv("", 16), 0);
    }

    // === Float Folding ===

    #[test]
    fn float_plain() {
        assert!((float_value("3.14") - 3.14).abs() < 1e-12);
        assert!((float_value("0.5") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn float_exponent() {
        assert!((float_value("5.5e3") - 5500.0).abs() < 1e-9);
        assert!((float_value("5.5e+3") - 5500.0).abs() < 1e-9);
        assert!((float_value("2.0e-2") - 0.02).abs() < 1e-12);
    }

    #[test]
    fn float_with_separators() {
        assert!((float_value("1_000.25") - 1000.25).abs() < 1e-9);
    }

    // === Escapes ===

    #[test]
    fn escape_table() {
        assert_eq!(escape_code('t'), Some(0x09));
        assert_eq!(escape_code('n'), Some(0x0A));
        assert_eq!(escape_code('\\'), Some(0x5C));
        assert_eq!(escape_code('q'), None);
    }

    #[test]
    fn cook_plain_body() {
        assert_eq!(cook_string_body("abc"), b"abc".to_vec());
        assert_eq!(cook_string_body(""), Vec::<u8>::new());
    }

    #[test]
    fn cook_fixed_escape() {
        assert_eq!(cook_string_body("a\\tb"), vec![b'a', 0x09, b'b']);
        assert_eq!(cook_string_body("a\\nb"), vec![b'a', 0x0A, b'b']);
    }

    #[test]
    fn cook_unicode_escape() {
        assert_eq!(cook_string_body("\\u{24}"), vec![0x24]);
        // Empty hex defaults to code point 0.
        assert_eq!(cook_string_body("\\u{}"), vec![0x00]);
        // Multi-byte encoding.
        assert_eq!(cook_string_body("\\u{24B6}"), "\u{24B6}".as_bytes().to_vec());
    }

    #[test]
    fn cook_line_continuation() {
        assert_eq!(cook_string_body("a\\\nb"), vec![b'a', b' ', b'b']);
    }

    #[test]
    fn cook_identity_escape() {
        assert_eq!(cook_string_body("\\j"), vec![b'j']);
    }

    #[test]
    fn cook_non_ascii_passthrough() {
        assert_eq!(cook_string_body("héllo"), "héllo".as_bytes().to_vec());
    }
}
