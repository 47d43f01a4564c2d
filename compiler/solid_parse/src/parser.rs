//! The LR driver: lazy states, shift-preferred, bottom-up reduction.
//!
//! States are closure sets computed on demand rather than a precompiled
//! table; the grammar stays data, not code. The driver keeps a state stack
//! and an item stack in lockstep: every shift pushes one item and one
//! successor state, every reduction pops one rule's worth of both and
//! pushes the freshly built node back into the input to be shifted by the
//! exposed state.

use tracing::trace;

use solid_lexer::{LexError, Screened};

use crate::configuration::Configuration;
use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::parse_node::{ParseItem, ParseNode};
use crate::symbol::GrammarSymbol;

/// Whether `symbol` accepts `item` for a shift.
fn symbol_matches(symbol: &GrammarSymbol, item: &ParseItem) -> bool {
    match (symbol, item) {
        (GrammarSymbol::Literal(text), ParseItem::Token(screened)) => screened.token.text == *text,
        (GrammarSymbol::Term(terminal), ParseItem::Token(screened)) => {
            terminal.matches(screened.token.kind)
        }
        (GrammarSymbol::Prod(name), ParseItem::Node(node)) => node.name == *name,
        _ => false,
    }
}

type State = Vec<Configuration>;

pub struct Parser<'g, I> {
    grammar: &'g Grammar,
    tokens: I,
    /// Reduced nodes (and the lookahead token they displaced) waiting to be
    /// re-consumed, innermost last.
    pending: Vec<ParseItem>,
    states: Vec<State>,
    items: Vec<ParseItem>,
}

impl<'g, I> Parser<'g, I>
where
    I: Iterator<Item = Result<Screened, LexError>>,
{
    pub fn new(grammar: &'g Grammar, tokens: I) -> Self {
        Parser {
            grammar,
            tokens,
            pending: Vec::new(),
            states: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Run the driver to completion: the goal node or the first error.
    pub fn parse(mut self) -> Result<ParseNode, ParseError> {
        self.states.push(self.grammar.start_state());
        let mut lookahead = self.next_item()?;

        loop {
            let Some(state) = self.states.last() else {
                return Err(ParseError::UnexpectedEnd { expected: vec![] });
            };

            if let Some(item) = &lookahead {
                if can_shift(state, item) {
                    let successor = self.goto(state, item);
                    trace!(item = item.tagname(), states = self.states.len(), "shift");
                    self.states.push(successor);
                    if let Some(item) = lookahead.take() {
                        self.items.push(item);
                    }
                    lookahead = self.next_item()?;
                    continue;
                }
            }

            let Some(config) = reducible(state, lookahead.as_ref()).cloned() else {
                return Err(self.unexpected(lookahead, state));
            };
            trace!(rule = %config.rule, "reduce");
            let node = self.reduce(&config.rule.production, config.rule.len());

            let accepted = node.name == self.grammar.goal()
                && lookahead.is_none()
                && self.items.is_empty()
                && self.states.len() == 1;
            if accepted {
                return Ok(node);
            }
            if let Some(item) = lookahead.take() {
                self.pending.push(item);
            }
            lookahead = Some(ParseItem::Node(node));
        }
    }

    /// The successor state after shifting `item` out of `state`.
    fn goto(&self, state: &State, item: &ParseItem) -> State {
        let advanced: Vec<Configuration> = state
            .iter()
            .filter(|c| c.next_symbol().is_some_and(|s| symbol_matches(s, item)))
            .map(Configuration::advanced)
            .collect();
        self.grammar.closure(&advanced)
    }

    /// Pop one rule's worth of items and states, building the node.
    fn reduce(&mut self, production: &str, len: usize) -> ParseNode {
        let split = self.items.len().saturating_sub(len);
        let children = self.items.split_off(split);
        let keep = self.states.len().saturating_sub(len);
        self.states.truncate(keep.max(1));
        ParseNode::new(production, children)
    }

    fn next_item(&mut self) -> Result<Option<ParseItem>, ParseError> {
        if let Some(item) = self.pending.pop() {
            return Ok(Some(item));
        }
        match self.tokens.next() {
            None => Ok(None),
            Some(Ok(screened)) => Ok(Some(ParseItem::Token(screened))),
            Some(Err(err)) => Err(ParseError::Lex(err)),
        }
    }

    fn unexpected(&self, lookahead: Option<ParseItem>, state: &State) -> ParseError {
        let expected = expected_symbols(state);
        match lookahead {
            None => ParseError::UnexpectedEnd { expected },
            Some(item) => {
                let (line, col) = item.position();
                ParseError::Unexpected {
                    text: item.source(),
                    line,
                    col,
                    expected,
                }
            }
        }
    }
}

fn can_shift(state: &State, item: &ParseItem) -> bool {
    state
        .iter()
        .any(|c| c.next_symbol().is_some_and(|s| symbol_matches(s, item)))
}

/// The first reducible configuration whose lookahead accepts the upcoming
/// item. With no upcoming item, any done configuration reduces.
fn reducible<'a>(state: &'a State, lookahead: Option<&ParseItem>) -> Option<&'a Configuration> {
    state.iter().find(|config| {
        if !config.done() {
            return false;
        }
        match lookahead {
            None => true,
            Some(ParseItem::Token(screened)) => config
                .lookahead
                .iter()
                .any(|terminal| terminal.matches(&screened.token)),
            // Nodes are always consumed by shifting, never by lookahead.
            Some(ParseItem::Node(_)) => false,
        }
    })
}

/// Sorted, deduplicated display strings of everything the state accepts.
fn expected_symbols(state: &State) -> Vec<String> {
    let mut expected: Vec<String> = Vec::new();
    for config in state {
        match config.next_symbol() {
            Some(symbol) => expected.push(symbol.to_string()),
            None => expected.extend(config.lookahead.iter().map(ToString::to_string)),
        }
    }
    expected.sort();
    expected.dedup();
    expected
}
