//! Source scanner for the Solid compiler.
//!
//! Wraps raw source text with sentinel boundary markers and yields one
//! positioned character at a time:
//!
//! - [`Scanner`]: owns the normalized, sentinel-wrapped text.
//! - [`Char`]: a positioned character with `lookahead(n)`.
//!
//! Line endings are normalized (`\r\n` | `\r` → `\n`) before any indexing,
//! so every position in this crate is in terms of the normalized, wrapped
//! text. Indexing is by Unicode scalar (char), not byte.

mod scanner;

pub use scanner::{Char, Scanner, ETX, STX};
