//! Productions and their flattened rules.

use std::fmt;

use crate::symbol::GrammarSymbol;

/// A named nonterminal with one or more alternative symbol sequences.
#[derive(Clone, Debug)]
pub struct Production {
    pub name: String,
    /// Alternatives in declaration order; each is a nonempty symbol sequence.
    pub sequences: Vec<Vec<GrammarSymbol>>,
}

impl Production {
    pub fn new(name: impl Into<String>, sequences: Vec<Vec<GrammarSymbol>>) -> Self {
        Production {
            name: name.into(),
            sequences,
        }
    }

    /// Expand each alternative into a [`Rule`] fixed at its choice index.
    pub fn to_rules(&self) -> Vec<Rule> {
        self.sequences
            .iter()
            .enumerate()
            .map(|(choice, symbols)| Rule {
                production: self.name.clone(),
                choice,
                symbols: symbols.clone(),
            })
            .collect()
    }
}

/// Productions are equal iff their rule sets are pairwise equal.
impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sequences == other.sequences
    }
}

impl Eq for Production {}

/// One alternative of a production, fixed at construction.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Display name of the owning production.
    pub production: String,
    /// Which alternative of the production this is.
    pub choice: usize,
    pub symbols: Vec<GrammarSymbol>,
}

impl Rule {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Rules are equal iff same production display name and identical symbol
/// sequence. The choice index is derived, not identity.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.production == other.production && self.symbols == other.symbols
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :=", self.production)?;
        for symbol in &self.symbols {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::symbol::Terminal;

    fn sum_production() -> Production {
        Production::new(
            "Sum",
            vec![
                vec![GrammarSymbol::Term(Terminal::Number)],
                vec![
                    GrammarSymbol::prod("Sum"),
                    GrammarSymbol::lit("+"),
                    GrammarSymbol::Term(Terminal::Number),
                ],
            ],
        )
    }

    // === Rule Expansion ===

    #[test]
    fn to_rules_expands_alternatives_in_order() {
        let rules = sum_production().to_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].choice, 0);
        assert_eq!(rules[0].symbols.len(), 1);
        assert_eq!(rules[1].choice, 1);
        assert_eq!(rules[1].to_string(), "Sum := Sum '+' NUMBER");
    }

    // === Equality ===

    #[test]
    fn rule_equality_ignores_choice_index() {
        let a = Rule {
            production: "Sum".into(),
            choice: 0,
            symbols: vec![GrammarSymbol::Term(Terminal::Number)],
        };
        let b = Rule {
            production: "Sum".into(),
            choice: 7,
            symbols: vec![GrammarSymbol::Term(Terminal::Number)],
        };
        assert_eq!(a, b);
    }

    #[test]
    fn rule_equality_needs_same_symbols() {
        let rules = sum_production().to_rules();
        assert_ne!(rules[0], rules[1]);
    }

    #[test]
    fn production_equality_is_rule_set_equality() {
        assert_eq!(sum_production(), sum_production());
        let other = Production::new("Sum", vec![vec![GrammarSymbol::Term(Terminal::Str)]]);
        assert_ne!(sum_production(), other);
    }
}
