//! Shared data model for the Solid compiler front end.
//!
//! This crate holds the pieces every pipeline stage agrees on:
//! - [`Span`]: compact source location (char indices over the wrapped source)
//! - [`Token`] / [`TokenKind`]: the closed token tagged union and its
//!   [`cook`](Token::cook) operation producing a [`Cooked`] semantic value
//! - [`tables`]: the fixed punctuator/keyword tables and radix keys
//! - [`cook`]: the numeric folding (`mv`) and escape-encoding primitives
//! - [`SolidConfig`]: the feature-toggle configuration object
//!
//! No `solid_*` dependencies — the scanner, lexer, parser, and type crates
//! all build on this one.

mod config;
pub mod cook;
mod span;
pub mod tables;
mod token;

pub use config::{CompilerOptions, Features, SolidConfig};
pub use span::Span;
pub use token::{CommentKind, Cooked, TemplatePosition, Token, TokenKind};
