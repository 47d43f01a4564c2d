//! Fixed punctuator, keyword, and radix tables.
//!
//! A token's cooked integer value is its index into the relevant table:
//! punctuators occupy 0–127, keywords 128–255, and first-seen identifiers
//! are assigned 256+ by the screener. Table order is therefore part of the
//! language's stable interface — append only.

/// Punctuator table, ordered. Cooked value = index.
///
/// Dispatch tries longest-match-first (3-char, then 2-char, then 1-char),
/// so multi-char entries need not precede their prefixes here.
pub const PUNCTUATORS: &[&str] = &[
    ";", ":", ",", "(", ")", "[", "]", ".", "=", "!", "?", "+", "-", "*", "/", "^", "<", ">",
    "<=", ">=", "!<", "!>", "==", "!=", "&&", "||", "+=", "-=", "*=", "/=", "^=", "&&=", "||=",
];

/// Keyword table, ordered. Cooked value = [`KEYWORD_BASE`] + index.
pub const KEYWORDS: &[&str] = &[
    "let", "unfixed", "true", "false", "null", "if", "then", "else", "bool", "int", "float",
    "str", "obj", "void", "unknown", "never", "mutable", "is", "isnt",
];

/// First cooked value for keywords.
pub const KEYWORD_BASE: u32 = 128;

/// First cooked value for identifiers (assigned by the screener).
pub const IDENTIFIER_BASE: u32 = 256;

/// Default radix for bare integer literals.
pub const RADIX_DEFAULT: u32 = 10;

/// Escape character introducing an explicit-radix integer literal.
pub const RADIX_ESCAPE: char = '\\';

/// Numeric separator character.
pub const SEPARATOR: char = '_';

/// Radix keys: the character following [`RADIX_ESCAPE`] selects the base.
pub const RADIX_KEYS: &[(char, u32)] = &[
    ('b', 2),
    ('q', 4),
    ('o', 8),
    ('d', 10),
    ('x', 16),
    ('z', 36),
];

// Table capacity invariants: indices must fit their reserved ranges.
const _: () = assert!(PUNCTUATORS.len() < 128);
const _: () = assert!(KEYWORDS.len() < 128);

/// Look up a punctuator's table index.
pub fn punctuator_index(text: &str) -> Option<u32> {
    PUNCTUATORS.iter().position(|&p| p == text).map(index_u32)
}

/// Look up a keyword's table index.
pub fn keyword_index(text: &str) -> Option<u32> {
    KEYWORDS.iter().position(|&k| k == text).map(index_u32)
}

/// Look up the radix selected by a radix key character.
pub fn radix_for_key(key: char) -> Option<u32> {
    RADIX_KEYS
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, radix)| radix)
}

/// Numeric value of a digit character (`0-9`, `a-z`, `A-Z`), radix-agnostic.
pub fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Check whether `c` is a valid digit of the given radix.
pub fn is_radix_digit(c: char, radix: u32) -> bool {
    digit_value(c).is_some_and(|v| v < radix)
}

/// Identifier start class: ASCII letter or underscore.
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Identifier continuation class: start class plus ASCII digits.
pub fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

fn index_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Table Ranges ===

    #[test]
    fn let_is_first_keyword() {
        assert_eq!(keyword_index("let"), Some(0));
    }

    #[test]
    fn punctuator_indices_are_table_order() {
        assert_eq!(punctuator_index(";"), Some(0));
        assert_eq!(punctuator_index("+"), Some(11));
        assert_eq!(punctuator_index("||="), Some(32));
        assert_eq!(punctuator_index("%%"), None);
    }

    #[test]
    fn keyword_lookup_misses_identifiers() {
        assert_eq!(keyword_index("foobar"), None);
        assert_eq!(keyword_index("Let"), None);
    }

    // === Radix Keys ===

    #[test]
    fn radix_keys() {
        assert_eq!(radix_for_key('b'), Some(2));
        assert_eq!(radix_for_key('x'), Some(16));
        assert_eq!(radix_for_key('z'), Some(36));
        assert_eq!(radix_for_key('y'), None);
    }

    // === Digit Classes ===

    #[test]
    fn digit_values_both_cases() {
        assert_eq!(digit_value('0'), Some(0));
        assert_eq!(digit_value('9'), Some(9));
        assert_eq!(digit_value('a'), Some(10));
        assert_eq!(digit_value('F'), Some(15));
        assert_eq!(digit_value('z'), Some(35));
        assert_eq!(digit_value('_'), None);
    }

    #[test]
    fn radix_digit_bounds() {
        assert!(is_radix_digit('1', 2));
        assert!(!is_radix_digit('2', 2));
        assert!(is_radix_digit('f', 16));
        assert!(!is_radix_digit('g', 16));
        assert!(is_radix_digit('Z', 36));
    }

    #[test]
    fn identifier_classes() {
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('A'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_continue('1'));
        assert!(!is_identifier_continue('-'));
    }
}
