//! Parse error types.

use std::fmt;

use solid_lexer::LexError;

/// A fatal syntax error. Aborts the enclosing `parse()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The underlying token stream failed.
    Lex(LexError),
    /// The current item matched no shiftable symbol and no reducible
    /// configuration's lookahead.
    Unexpected {
        /// Source text of the offending item.
        text: String,
        /// Zero-based line of the offending item.
        line: i32,
        /// Zero-based column of the offending item.
        col: u32,
        /// Display strings of the symbols that would have been accepted.
        expected: Vec<String>,
    },
    /// Input ended while the goal was still incomplete.
    UnexpectedEnd { expected: Vec<String> },
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

fn write_expected(f: &mut fmt::Formatter<'_>, expected: &[String]) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [one] => write!(f, ", expected {one}"),
        many => {
            write!(f, ", expected one of ")?;
            for (i, symbol) in many.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{symbol}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{err}"),
            ParseError::Unexpected {
                text,
                line,
                col,
                expected,
            } => {
                write!(
                    f,
                    "syntax error at line {}, col {}: unexpected `{text}`",
                    line + 1,
                    col + 1
                )?;
                write_expected(f, expected)
            }
            ParseError::UnexpectedEnd { expected } => {
                write!(f, "syntax error: unexpected end of input")?;
                write_expected(f, expected)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_renders_one_based() {
        let err = ParseError::Unexpected {
            text: "+".into(),
            line: 0,
            col: 4,
            expected: vec!["NUMBER".into(), "';'".into()],
        };
        let msg = format!("{err}");
        assert!(msg.contains("line 1, col 5"), "got: {msg}");
        assert!(msg.contains("unexpected `+`"));
        assert!(msg.contains("expected one of NUMBER, ';'"));
    }

    #[test]
    fn single_expected_symbol_reads_flat() {
        let err = ParseError::UnexpectedEnd {
            expected: vec!["';'".into()],
        };
        assert_eq!(
            format!("{err}"),
            "syntax error: unexpected end of input, expected ';'"
        );
    }
}
