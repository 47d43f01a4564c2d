//! Grammar engine and LR parser for the Solid compiler.
//!
//! The engine half (productions, rules, configurations, FIRST/FOLLOW,
//! closure) is grammar-agnostic and drives two grammars: the Solid
//! language grammar and the embedded EBNF meta-grammar used to describe
//! grammars in source form. The parser half is a lazy-state LR driver
//! consuming screened tokens.
//!
//! [`parse_source`] wires the whole front end together:
//! Scanner → Lexer → Screener → Parser.

mod configuration;
mod error;
mod grammar;
pub mod grammar_ebnf;
pub mod grammar_solid;
pub mod interchange;
mod parse_node;
mod parser;
mod production;
mod symbol;

pub use configuration::Configuration;
pub use error::ParseError;
pub use grammar::Grammar;
pub use parse_node::{ParseItem, ParseNode};
pub use parser::Parser;
pub use production::{Production, Rule};
pub use symbol::{GrammarSymbol, Terminal, TerminalSymbol};

use solid_ir::SolidConfig;
use solid_lexer::{Lexer, Screener};
use solid_scan::Scanner;

/// Parse one Solid source unit to its goal parse node.
pub fn parse_source(source: &str, config: &SolidConfig) -> Result<ParseNode, ParseError> {
    let scanner = Scanner::new(source);
    let lexer = Lexer::new(&scanner, config);
    let screener = Screener::new(lexer.generate());
    let grammar = grammar_solid::solid_grammar();
    Parser::new(&grammar, screener).parse()
}
