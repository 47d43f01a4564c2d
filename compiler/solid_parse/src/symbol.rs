//! Grammar symbols: literals, token-class terminals, nonterminal references.

use std::fmt;

use solid_ir::{TemplatePosition, Token, TokenKind};

/// A token-class terminal: matches any token of the class, regardless of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Number,
    Str,
    TemplateFull,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,
    Identifier,
}

impl Terminal {
    /// Display tag, also the `term` name in the JSON interchange format.
    pub fn tagname(self) -> &'static str {
        match self {
            Terminal::Number => "NUMBER",
            Terminal::Str => "STRING",
            Terminal::TemplateFull => "TEMPLATE_FULL",
            Terminal::TemplateHead => "TEMPLATE_HEAD",
            Terminal::TemplateMiddle => "TEMPLATE_MIDDLE",
            Terminal::TemplateTail => "TEMPLATE_TAIL",
            Terminal::Identifier => "IDENTIFIER",
        }
    }

    /// Inverse of [`tagname`](Terminal::tagname), for interchange decoding.
    pub fn from_name(name: &str) -> Option<Terminal> {
        match name {
            "NUMBER" => Some(Terminal::Number),
            "STRING" => Some(Terminal::Str),
            "TEMPLATE_FULL" => Some(Terminal::TemplateFull),
            "TEMPLATE_HEAD" => Some(Terminal::TemplateHead),
            "TEMPLATE_MIDDLE" => Some(Terminal::TemplateMiddle),
            "TEMPLATE_TAIL" => Some(Terminal::TemplateTail),
            "IDENTIFIER" => Some(Terminal::Identifier),
            _ => None,
        }
    }

    /// Whether a token of `kind` belongs to this class.
    pub fn matches(self, kind: TokenKind) -> bool {
        match self {
            Terminal::Number => matches!(kind, TokenKind::Number { .. }),
            Terminal::Str => kind == TokenKind::Str,
            Terminal::TemplateFull => {
                kind == TokenKind::Template {
                    position: TemplatePosition::Full,
                }
            }
            Terminal::TemplateHead => {
                kind == TokenKind::Template {
                    position: TemplatePosition::Head,
                }
            }
            Terminal::TemplateMiddle => {
                kind == TokenKind::Template {
                    position: TemplatePosition::Middle,
                }
            }
            Terminal::TemplateTail => {
                kind == TokenKind::Template {
                    position: TemplatePosition::Tail,
                }
            }
            Terminal::Identifier => matches!(
                kind,
                TokenKind::IdentifierBasic | TokenKind::IdentifierUnicode
            ),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tagname())
    }
}

/// A terminal as it appears in FIRST/FOLLOW/lookahead sets.
///
/// `Ord` so lookahead sets can live in `BTreeSet` with stable iteration
/// order (deterministic diagnostics and tests).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TerminalSymbol {
    /// Exact-text match: punctuators, keywords, filebound sentinels.
    Literal(String),
    /// Token-class match.
    Term(Terminal),
}

impl TerminalSymbol {
    /// Whether `token` satisfies this terminal.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TerminalSymbol::Literal(text) => token.text == *text,
            TerminalSymbol::Term(terminal) => terminal.matches(token.kind),
        }
    }
}

impl fmt::Display for TerminalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalSymbol::Literal(text) => write!(f, "'{text}'"),
            TerminalSymbol::Term(terminal) => write!(f, "{terminal}"),
        }
    }
}

/// A symbol in a production's right-hand side.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GrammarSymbol {
    /// Terminal matched by exact token text.
    Literal(String),
    /// Terminal matched by token class.
    Term(Terminal),
    /// Nonterminal reference, by the production's display name.
    Prod(String),
}

impl GrammarSymbol {
    /// Literal-symbol convenience constructor.
    pub fn lit(text: impl Into<String>) -> GrammarSymbol {
        GrammarSymbol::Literal(text.into())
    }

    /// Nonterminal-reference convenience constructor.
    pub fn prod(name: impl Into<String>) -> GrammarSymbol {
        GrammarSymbol::Prod(name.into())
    }

    /// Whether this symbol is a nonterminal reference.
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, GrammarSymbol::Prod(_))
    }

    /// This symbol as a lookahead-set terminal, if it is one.
    pub fn as_terminal(&self) -> Option<TerminalSymbol> {
        match self {
            GrammarSymbol::Literal(text) => Some(TerminalSymbol::Literal(text.clone())),
            GrammarSymbol::Term(terminal) => Some(TerminalSymbol::Term(*terminal)),
            GrammarSymbol::Prod(_) => None,
        }
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Literal(text) => write!(f, "'{text}'"),
            GrammarSymbol::Term(terminal) => write!(f, "{terminal}"),
            GrammarSymbol::Prod(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solid_ir::Span;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Span::DUMMY, 0, 0)
    }

    // === Terminal Matching ===

    #[test]
    fn terminal_classes_match_kinds() {
        let number = TokenKind::Number {
            radix: 10,
            separators: false,
            float: false,
        };
        assert!(Terminal::Number.matches(number));
        assert!(!Terminal::Str.matches(number));
        assert!(Terminal::Identifier.matches(TokenKind::IdentifierBasic));
        assert!(Terminal::Identifier.matches(TokenKind::IdentifierUnicode));
        assert!(Terminal::TemplateHead.matches(TokenKind::Template {
            position: TemplatePosition::Head
        }));
        assert!(!Terminal::TemplateHead.matches(TokenKind::Template {
            position: TemplatePosition::Tail
        }));
    }

    #[test]
    fn literal_matches_exact_text() {
        let sym = TerminalSymbol::Literal("let".into());
        assert!(sym.matches(&tok(TokenKind::Keyword { index: 0 }, "let")));
        assert!(!sym.matches(&tok(TokenKind::IdentifierBasic, "lets")));
    }

    // === Names ===

    #[test]
    fn tagname_roundtrip() {
        for terminal in [
            Terminal::Number,
            Terminal::Str,
            Terminal::TemplateFull,
            Terminal::TemplateHead,
            Terminal::TemplateMiddle,
            Terminal::TemplateTail,
            Terminal::Identifier,
        ] {
            assert_eq!(Terminal::from_name(terminal.tagname()), Some(terminal));
        }
        assert_eq!(Terminal::from_name("KEYWORD"), None);
    }

    #[test]
    fn symbol_display() {
        assert_eq!(GrammarSymbol::lit(";").to_string(), "';'");
        assert_eq!(GrammarSymbol::Term(Terminal::Number).to_string(), "NUMBER");
        assert_eq!(GrammarSymbol::prod("Expression").to_string(), "Expression");
    }
}
