//! LR configurations: dotted rules with lookahead sets.

use std::collections::BTreeSet;
use std::fmt;

use crate::production::Rule;
use crate::symbol::{GrammarSymbol, TerminalSymbol};

/// A rule with a marker position and a lookahead terminal set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub rule: Rule,
    /// Marker position, `0..=rule.len()`.
    pub marker: usize,
    pub lookahead: BTreeSet<TerminalSymbol>,
}

impl Configuration {
    pub fn new(rule: Rule, marker: usize, lookahead: BTreeSet<TerminalSymbol>) -> Self {
        Configuration {
            rule,
            marker,
            lookahead,
        }
    }

    /// Fresh configuration with the marker at the start of `rule`.
    pub fn start(rule: Rule, lookahead: BTreeSet<TerminalSymbol>) -> Self {
        Configuration::new(rule, 0, lookahead)
    }

    /// Symbols already matched.
    pub fn before(&self) -> &[GrammarSymbol] {
        &self.rule.symbols[..self.marker]
    }

    /// Symbols still to match.
    pub fn after(&self) -> &[GrammarSymbol] {
        &self.rule.symbols[self.marker..]
    }

    /// The symbol immediately after the marker, if any.
    pub fn next_symbol(&self) -> Option<&GrammarSymbol> {
        self.rule.symbols.get(self.marker)
    }

    /// The second symbol after the marker: the lookahead seed for closure
    /// expansion.
    pub fn second_symbol(&self) -> Option<&GrammarSymbol> {
        self.rule.symbols.get(self.marker + 1)
    }

    /// Whether the marker is at the end: the configuration is reducible.
    pub fn done(&self) -> bool {
        self.marker == self.rule.len()
    }

    /// Equality modulo lookahead: same rule, same marker.
    pub fn same_core(&self, other: &Configuration) -> bool {
        self.marker == other.marker && self.rule == other.rule
    }

    /// This configuration with the marker advanced one symbol.
    pub fn advanced(&self) -> Configuration {
        Configuration {
            rule: self.rule.clone(),
            marker: self.marker + 1,
            lookahead: self.lookahead.clone(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :=", self.rule.production)?;
        for (i, symbol) in self.rule.symbols.iter().enumerate() {
            if i == self.marker {
                write!(f, " .")?;
            }
            write!(f, " {symbol}")?;
        }
        if self.done() {
            write!(f, " .")?;
        }
        write!(f, " [")?;
        for (i, terminal) in self.lookahead.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{terminal}")?;
        }
        write!(f, "]")
    }
}
