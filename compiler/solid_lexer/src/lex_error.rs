//! Lexical error types.
//!
//! Every lex error carries the zero-based line/column of the offending
//! position (1-based in `Display`, which is the user-facing rendering)
//! plus a structured kind with per-variant payloads.

use std::fmt;

use solid_scan::Char;

/// A fatal lexical error. Aborts the token stream that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    /// Zero-based line index (`-1` would be the sentinel line).
    pub line: i32,
    /// Zero-based column index.
    pub col: u32,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexical error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No recognizer matched the current character.
    UnrecognizedChar { found: char },
    /// A delimited token reached end-of-text before its closing delimiter.
    UnterminatedToken { tag: &'static str },
    /// Malformed `\u{…}` escape in a string literal.
    InvalidEscape { text: String },
    /// Numeric separator at the end of a literal or next to another separator.
    SeparatorPlacement,
    /// Explicit-radix literal not followed by a valid digit of that radix.
    InvalidRadixDigit { radix: u32, found: Option<char> },
    /// An identifier was seen but the `variables` feature is disabled.
    IdentifiersDisabled,
}

impl LexError {
    /// Error at the position of the given character.
    pub fn at(c: Char<'_>, kind: LexErrorKind) -> Self {
        LexError {
            line: c.line_index(),
            col: c.col_index(),
            kind,
        }
    }

    /// Error at an explicit position (used when the offending token's start
    /// is the best anchor, e.g. unterminated tokens).
    pub fn at_position(line: i32, col: u32, kind: LexErrorKind) -> Self {
        LexError { line, col, kind }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lexical error at line {}, col {}: {}",
            self.line + 1,
            self.col + 1,
            self.kind
        )
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnrecognizedChar { found } => {
                write!(f, "unrecognized character {found:?}")
            }
            LexErrorKind::UnterminatedToken { tag } => {
                write!(f, "unterminated {} reached end of text", tag.to_lowercase())
            }
            LexErrorKind::InvalidEscape { text } => {
                write!(f, "invalid escape sequence `{text}`")
            }
            LexErrorKind::SeparatorPlacement => {
                write!(
                    f,
                    "numeric separator must appear between two digits of the literal"
                )
            }
            LexErrorKind::InvalidRadixDigit { radix, found } => match found {
                Some(c) => write!(f, "{c:?} is not a valid digit in base {radix}"),
                None => write!(f, "expected a digit in base {radix}"),
            },
            LexErrorKind::IdentifiersDisabled => {
                write!(f, "identifiers are not supported at this language version")
            }
        }
    }
}

impl std::error::Error for LexError {}
