//! The screener: trivia filtering, cooking, identifier numbering.
//!
//! Sits between the lexer and the parser. Whitespace and comments are
//! dropped; every surviving token is paired with its cooked value. The
//! screener is the one component that can cook identifiers, because it
//! owns the registry that assigns their numeric ids.

use rustc_hash::FxHashMap;

use solid_ir::tables::IDENTIFIER_BASE;
use solid_ir::{Cooked, Token, TokenKind};

use crate::lex_error::LexError;

/// De-duplicating identifier table.
///
/// The first occurrence of each distinct identifier text gets the next
/// free id, starting at [`IDENTIFIER_BASE`]; later occurrences reuse it.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    ids: FxHashMap<String, i64>,
    order: Vec<String>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        IdentifierRegistry::default()
    }

    /// The id for `text`, assigning a fresh one on first sight.
    pub fn id_for(&mut self, text: &str) -> i64 {
        if let Some(&id) = self.ids.get(text) {
            return id;
        }
        let id = i64::from(IDENTIFIER_BASE) + self.order.len() as i64;
        self.ids.insert(text.to_owned(), id);
        self.order.push(text.to_owned());
        id
    }

    /// The text registered under `id`, if any.
    pub fn text_for(&self, id: i64) -> Option<&str> {
        let offset = usize::try_from(id - i64::from(IDENTIFIER_BASE)).ok()?;
        self.order.get(offset).map(String::as_str)
    }

    /// Number of distinct identifiers seen.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A non-trivia token paired with its cooked value.
#[derive(Clone, Debug, PartialEq)]
pub struct Screened {
    pub token: Token,
    pub cooked: Cooked,
}

impl Screened {
    /// The grammar tag this token matches against terminal symbols.
    pub fn tagname(&self) -> &'static str {
        self.token.tagname()
    }
}

/// Lazy screening pass over a token stream.
///
/// Propagates the underlying stream's error unchanged.
pub struct Screener<I> {
    tokens: I,
    registry: IdentifierRegistry,
}

impl<I> Screener<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        Screener {
            tokens,
            registry: IdentifierRegistry::new(),
        }
    }

    /// Consume the screener, returning the registry accumulated so far.
    pub fn into_registry(self) -> IdentifierRegistry {
        self.registry
    }

    fn screen(&mut self, token: Token) -> Screened {
        let cooked = match token.kind {
            TokenKind::IdentifierBasic => Cooked::Integer(self.registry.id_for(&token.text)),
            TokenKind::IdentifierUnicode => {
                // The backtick delimiters are lexical, not part of the name.
                let inner: String = {
                    let chars: Vec<char> = token.text.chars().collect();
                    chars[1..chars.len() - 1].iter().collect()
                };
                Cooked::Integer(self.registry.id_for(&inner))
            }
            _ => token.cook(),
        };
        Screened { token, cooked }
    }
}

impl<I> Iterator for Screener<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    type Item = Result<Screened, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.tokens.next()? {
                Ok(token) if token.is_trivia() => {}
                Ok(token) => return Some(Ok(self.screen(token))),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
