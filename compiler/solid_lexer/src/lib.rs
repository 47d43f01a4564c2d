//! Hand-written lexer for the Solid compiler.
//!
//! Consumes the scanner's character stream with a 4-character lookahead
//! window (`c0..c3`) and produces a lazy sequence of [`Token`]s, dispatching
//! to per-token-kind recognizers in a fixed order. All lexical errors are
//! fatal to the stream: the first error aborts further tokenization.
//!
//! The [`Screener`] sits between lexer and parser: it filters trivia
//! (whitespace, comments), cooks the surviving tokens, and assigns
//! de-duplicated numeric ids to identifiers.
//!
//! [`Token`]: solid_ir::Token

mod lex_error;
mod lexer;
mod screener;

pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{Lexer, TokenStream};
pub use screener::{IdentifierRegistry, Screened, Screener};
