//! Token model: a closed tagged union over every lexical shape.
//!
//! Each variant carries only the fields relevant to its kind; the literal
//! source text (the "cargo") is collected by the lexer into a local buffer
//! and the token constructed immutably once the span is known.
//!
//! [`Token::cook`] produces the token's semantic value. Identifier tokens
//! are the one deferral: their numeric id is assigned by the screening
//! pass, which owns the de-duplication registry.

use std::fmt;

use crate::cook;
use crate::span::Span;
use crate::tables::{KEYWORD_BASE, RADIX_ESCAPE};

/// Position of a template-literal token within its interpolation sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplatePosition {
    /// `'''…'''` — no interpolation.
    Full,
    /// `'''…{{` — opens an interpolation.
    Head,
    /// `}}…{{` — between two interpolations.
    Middle,
    /// `}}…'''` — closes the last interpolation.
    Tail,
}

/// Comment flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `% …` to end of line.
    Line,
    /// `{% … %}`, nestable.
    Multi,
    /// `%%% … %%%`, delimiters standing alone on their own lines.
    Block,
}

/// Closed token tagged union.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// STX/ETX sentinel bracketing the source.
    Filebound {
        /// `true` for STX, `false` for ETX.
        start: bool,
    },
    /// Maximal run of space/tab/line feed.
    Whitespace,
    /// Fixed punctuator; `index` into [`crate::tables::PUNCTUATORS`].
    Punctuator { index: u32 },
    /// Fixed keyword; `index` into [`crate::tables::KEYWORDS`].
    Keyword { index: u32 },
    /// `[A-Za-z_][A-Za-z0-9_]*` identifier.
    IdentifierBasic,
    /// Backtick-delimited unicode identifier.
    IdentifierUnicode,
    /// Integer or float literal.
    Number {
        /// Numeric base the digits were written in.
        radix: u32,
        /// Whether numeric separators were permitted when lexed.
        separators: bool,
        /// Whether the literal has a fractional/exponent part.
        float: bool,
    },
    /// Single-quoted string literal.
    Str,
    /// Template literal piece.
    Template { position: TemplatePosition },
    /// Comment (trivia).
    Comment { kind: CommentKind },
}

/// Cooked semantic value of a token.
#[derive(Clone, Debug, PartialEq)]
pub enum Cooked {
    /// Trivia (and identifiers before screening): no semantic value.
    None,
    /// Filebound markers: `true` = start, `false` = end.
    Boolean(bool),
    /// Numbers and table indices.
    Integer(i64),
    /// Float literals.
    Float(f64),
    /// Strings and templates as UTF-8 code units.
    CodeUnits(Vec<u8>),
}

/// A lexed token: kind, cargo, and source position of its first character.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal source substring this token owns.
    pub text: String,
    /// Char-index span over the wrapped source.
    pub span: Span,
    /// Zero-based line of the first character (`-1` on the sentinel line).
    pub line_index: i32,
    /// Zero-based column of the first character.
    pub col_index: u32,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
        line_index: i32,
        col_index: u32,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            line_index,
            col_index,
        }
    }

    /// Display tag for diagnostics and golden tests.
    pub fn tagname(&self) -> &'static str {
        match self.kind {
            TokenKind::Filebound { .. } => "FILEBOUND",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Punctuator { .. } => "PUNCTUATOR",
            TokenKind::Keyword { .. } => "KEYWORD",
            TokenKind::IdentifierBasic | TokenKind::IdentifierUnicode => "IDENTIFIER",
            TokenKind::Number { .. } => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Template { .. } => "TEMPLATE",
            TokenKind::Comment { .. } => "COMMENT",
        }
    }

    /// Whitespace and comments are trivia: screened out of parser input.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Comment { .. }
        )
    }

    /// Cook this token into its semantic value.
    ///
    /// Total: all shape validation happened while lexing. Identifiers cook
    /// to [`Cooked::None`] here; the screener assigns their numeric id.
    pub fn cook(&self) -> Cooked {
        match self.kind {
            TokenKind::Filebound { start } => Cooked::Boolean(start),
            TokenKind::Whitespace | TokenKind::Comment { .. } => Cooked::None,
            TokenKind::Punctuator { index } => Cooked::Integer(i64::from(index)),
            TokenKind::Keyword { index } => Cooked::Integer(i64::from(KEYWORD_BASE + index)),
            TokenKind::IdentifierBasic | TokenKind::IdentifierUnicode => Cooked::None,
            TokenKind::Number { radix, float, .. } => cook_number(&self.text, radix, float),
            TokenKind::Str => {
                Cooked::CodeUnits(cook::cook_string_body(&self.text[1..self.text.len() - 1]))
            }
            TokenKind::Template { position } => {
                Cooked::CodeUnits(template_body(&self.text, position).as_bytes().to_vec())
            }
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.tagname(), self.text, self.span)
    }
}

/// Strip a template piece's delimiters: `'''`/`{{`/`}}` per position.
fn template_body(text: &str, position: TemplatePosition) -> &str {
    let (open, close) = match position {
        TemplatePosition::Full => (3, 3),
        TemplatePosition::Head => (3, 2),
        TemplatePosition::Middle => (2, 2),
        TemplatePosition::Tail => (2, 3),
    };
    &text[open..text.len() - close]
}

/// Cook a numeric literal: strip sign and radix-escape prefix, fold digits.
fn cook_number(text: &str, radix: u32, float: bool) -> Cooked {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if float {
        let value = cook::float_value(rest);
        return Cooked::Float(if negative { -value } else { value });
    }
    let digits = match rest.strip_prefix(RADIX_ESCAPE) {
        Some(keyed) => {
            // Drop the one-char radix key after the escape.
            let mut chars = keyed.chars();
            chars.next();
            chars.as_str()
        }
        None => rest,
    };
    let value = cook::mv(digits, radix);
    Cooked::Integer(if negative { value.wrapping_neg() } else { value })
}
