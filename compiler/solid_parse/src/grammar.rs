//! The grammar: a name-keyed production set with FIRST/FOLLOW/closure.
//!
//! The engine is grammar-agnostic: productions and terminals are supplied
//! per grammar, the set computations are shared. A nonterminal reference
//! that names no registered production is simply unmatchable (empty rule
//! set, empty FIRST) — validation of grammar well-formedness belongs to
//! the tooling that authors grammars, not the engine.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::configuration::Configuration;
use crate::production::{Production, Rule};
use crate::symbol::{GrammarSymbol, TerminalSymbol};

pub struct Grammar {
    productions: rustc_hash::FxHashMap<String, Production>,
    /// Declaration order of production names; the map alone loses it.
    order: Vec<String>,
    goal: String,
}

impl Grammar {
    /// Build a grammar from productions and the goal production's name.
    ///
    /// Later productions shadow earlier ones with the same name.
    pub fn new(productions: Vec<Production>, goal: impl Into<String>) -> Self {
        let mut map = rustc_hash::FxHashMap::default();
        let mut order = Vec::with_capacity(productions.len());
        for production in productions {
            if !map.contains_key(&production.name) {
                order.push(production.name.clone());
            }
            map.insert(production.name.clone(), production);
        }
        Grammar {
            productions: map,
            order,
            goal: goal.into(),
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn production(&self, name: &str) -> Option<&Production> {
        self.productions.get(name)
    }

    /// All rules, flattened from every production in declaration order.
    pub fn rules(&self) -> Vec<Rule> {
        self.order
            .iter()
            .filter_map(|name| self.productions.get(name))
            .flat_map(Production::to_rules)
            .collect()
    }

    /// The rules of one production (empty for unknown names).
    pub fn rules_of(&self, name: &str) -> Vec<Rule> {
        self.productions
            .get(name)
            .map(Production::to_rules)
            .unwrap_or_default()
    }

    /// FIRST set of a grammar symbol.
    ///
    /// Terminals are their own singleton. For a nonterminal, the union of
    /// FIRST over each alternative's leading symbol, skipping alternatives
    /// whose leading symbol is the production itself. The skip terminates
    /// direct left recursion but does not expand it, so FIRST is exact only
    /// when left recursion goes through the same production. Indirect left
    /// recursion is not supported.
    pub fn first(&self, symbol: &GrammarSymbol) -> BTreeSet<TerminalSymbol> {
        let mut out = BTreeSet::new();
        match symbol {
            GrammarSymbol::Literal(_) | GrammarSymbol::Term(_) => {
                if let Some(terminal) = symbol.as_terminal() {
                    out.insert(terminal);
                }
            }
            GrammarSymbol::Prod(name) => {
                for rule in self.rules_of(name) {
                    let Some(leading) = rule.symbols.first() else {
                        continue;
                    };
                    if leading == symbol {
                        continue;
                    }
                    out.extend(self.first(leading));
                }
            }
        }
        out
    }

    /// FOLLOW set of a grammar symbol: everything that can appear
    /// immediately after it in some sentential form.
    pub fn follow(&self, symbol: &GrammarSymbol) -> BTreeSet<TerminalSymbol> {
        let mut visited = FxHashSet::default();
        self.follow_inner(symbol, &mut visited)
    }

    fn follow_inner(
        &self,
        symbol: &GrammarSymbol,
        visited: &mut FxHashSet<String>,
    ) -> BTreeSet<TerminalSymbol> {
        let mut out = BTreeSet::new();
        if let GrammarSymbol::Prod(name) = symbol {
            // Mutually tail-recursive productions would otherwise loop.
            if !visited.insert(name.clone()) {
                return out;
            }
        }
        for rule in self.rules() {
            for (i, candidate) in rule.symbols.iter().enumerate() {
                if candidate != symbol {
                    continue;
                }
                match rule.symbols.get(i + 1) {
                    Some(next) => out.extend(self.first(next)),
                    None => out.extend(
                        self.follow_inner(&GrammarSymbol::prod(rule.production.clone()), visited),
                    ),
                }
            }
        }
        out
    }

    /// LR closure of a configuration set, as a fixed point.
    ///
    /// Each configuration with a nonterminal after its marker spawns that
    /// nonterminal's rules as fresh zero-marker configurations, with a
    /// lookahead seeded from FIRST of the second symbol after the marker
    /// (or inherited when the nonterminal is last). A spawned configuration
    /// whose rule and marker already exist merges lookaheads instead of
    /// duplicating.
    pub fn closure(&self, configs: &[Configuration]) -> Vec<Configuration> {
        let mut out: Vec<Configuration> = Vec::new();
        for config in configs {
            merge_into(&mut out, config.clone());
        }

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut additions: Vec<Configuration> = Vec::new();
            for config in &out {
                let Some(GrammarSymbol::Prod(name)) = config.next_symbol() else {
                    continue;
                };
                let lookahead = match config.second_symbol() {
                    Some(second) => self.first(second),
                    None => config.lookahead.clone(),
                };
                for rule in self.rules_of(name) {
                    additions.push(Configuration::start(rule, lookahead.clone()));
                }
            }

            let mut changed = false;
            for addition in additions {
                changed |= merge_into(&mut out, addition);
            }
            if !changed {
                break;
            }
        }
        debug!(passes, configurations = out.len(), "closure fixed point");
        out
    }

    /// The parser's initial state: the goal production's rules at marker 0,
    /// closed.
    pub fn start_state(&self) -> Vec<Configuration> {
        let seeds: Vec<Configuration> = self
            .rules_of(&self.goal)
            .into_iter()
            .map(|rule| Configuration::start(rule, BTreeSet::new()))
            .collect();
        self.closure(&seeds)
    }
}

/// Merge `addition` into `set`: extend the lookahead of a same-core
/// configuration, or append. Returns whether anything changed.
fn merge_into(set: &mut Vec<Configuration>, addition: Configuration) -> bool {
    if let Some(existing) = set.iter_mut().find(|c| c.same_core(&addition)) {
        let before = existing.lookahead.len();
        existing.lookahead.extend(addition.lookahead);
        existing.lookahead.len() != before
    } else {
        set.push(addition);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::symbol::Terminal;

    /// Sum := Number | Sum '+' Number ; Goal := Sum ';'
    fn sums() -> Grammar {
        Grammar::new(
            vec![
                Production::new(
                    "Goal",
                    vec![vec![GrammarSymbol::prod("Sum"), GrammarSymbol::lit(";")]],
                ),
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
                ),
            ],
            "Goal",
        )
    }

    fn literal(text: &str) -> TerminalSymbol {
        TerminalSymbol::Literal(text.into())
    }

    // === FIRST ===

    #[test]
    fn first_of_terminal_is_singleton() {
        let grammar = sums();
        let first = grammar.first(&GrammarSymbol::lit("+"));
        assert_eq!(first, BTreeSet::from([literal("+")]));
    }

    #[test]
    fn first_of_nonterminal_skips_left_recursive_alternative() {
        let grammar = sums();
        let first = grammar.first(&GrammarSymbol::prod("Sum"));
        assert_eq!(first, BTreeSet::from([TerminalSymbol::Term(Terminal::Number)]));
    }

    #[test]
    fn first_of_unknown_nonterminal_is_empty() {
        let grammar = sums();
        assert!(grammar.first(&GrammarSymbol::prod("Missing")).is_empty());
    }

    // === FOLLOW ===

    #[test]
    fn follow_unions_next_and_parent_follow() {
        let grammar = sums();
        // Sum is followed by ';' (Goal) and '+' (its own recursion).
        let follow = grammar.follow(&GrammarSymbol::prod("Sum"));
        assert_eq!(follow, BTreeSet::from([literal("+"), literal(";")]));
    }

    #[test]
    fn follow_of_last_symbol_recurses_into_production() {
        let grammar = sums();
        // NUMBER ends both Sum rules, so it inherits FOLLOW(Sum).
        let follow = grammar.follow(&GrammarSymbol::Term(Terminal::Number));
        assert_eq!(follow, BTreeSet::from([literal("+"), literal(";")]));
    }

    // === Closure ===

    #[test]
    fn closure_expands_nonterminals_with_seeded_lookahead() {
        let grammar = sums();
        let state = grammar.start_state();
        // Goal := . Sum ';'  plus both Sum rules at marker 0.
        assert_eq!(state.len(), 3);
        let sum_rules: Vec<&Configuration> = state
            .iter()
            .filter(|c| c.rule.production == "Sum")
            .collect();
        assert_eq!(sum_rules.len(), 2);
        for config in sum_rules {
            assert_eq!(config.marker, 0);
            // Seeded from FIRST(';') via Goal, merged with FIRST('+') via
            // the recursive Sum alternative.
            assert_eq!(config.lookahead, BTreeSet::from([literal("+"), literal(";")]));
        }
    }

    #[test]
    fn closure_is_a_fixed_point() {
        let grammar = sums();
        let once = grammar.start_state();
        let twice = grammar.closure(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn shadowing_keeps_last_production() {
        let grammar = Grammar::new(
            vec![
                Production::new("P", vec![vec![GrammarSymbol::Term(Terminal::Number)]]),
                Production::new("P", vec![vec![GrammarSymbol::Term(Terminal::Str)]]),
            ],
            "P",
        );
        let rules = grammar.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].symbols, vec![GrammarSymbol::Term(Terminal::Str)]);
    }
}
