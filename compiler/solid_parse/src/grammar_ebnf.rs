//! The embedded EBNF meta-grammar.
//!
//! A second, independent grammar built on the same engine, used to describe
//! grammars in source form and lower them to the JSON interchange shape.
//! Nonterminals are plain identifiers, terminal literals are string
//! literals, token-class terminals are identifiers spelled like their
//! display tags (`NUMBER`, `IDENTIFIER`, …). Alternatives separate with
//! `/`, productions close with `;`:
//!
//! ```text
//! sum : sum '+' NUMBER / NUMBER ;
//! ```

use solid_ir::Cooked;
use solid_scan::{ETX, STX};

use crate::grammar::Grammar;
use crate::interchange::{ProductionJson, SymbolJson};
use crate::parse_node::{ParseItem, ParseNode};
use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal};

/// Build the meta-grammar. Goal production: `MetaGoal`.
pub fn ebnf_grammar() -> Grammar {
    let stx = GrammarSymbol::lit(STX.to_string());
    let etx = GrammarSymbol::lit(ETX.to_string());
    let ident = GrammarSymbol::Term(Terminal::Identifier);
    let string = GrammarSymbol::Term(Terminal::Str);

    Grammar::new(
        vec![
            Production::new(
                "MetaGoal",
                vec![vec![stx, GrammarSymbol::prod("ProductionList"), etx]],
            ),
            Production::new(
                "ProductionList",
                vec![
                    vec![GrammarSymbol::prod("Production")],
                    vec![
                        GrammarSymbol::prod("ProductionList"),
                        GrammarSymbol::prod("Production"),
                    ],
                ],
            ),
            Production::new(
                "Production",
                vec![vec![
                    ident.clone(),
                    GrammarSymbol::lit(":"),
                    GrammarSymbol::prod("Definition"),
                    GrammarSymbol::lit(";"),
                ]],
            ),
            Production::new(
                "Definition",
                vec![
                    vec![GrammarSymbol::prod("Sequence")],
                    vec![
                        GrammarSymbol::prod("Definition"),
                        GrammarSymbol::lit("/"),
                        GrammarSymbol::prod("Sequence"),
                    ],
                ],
            ),
            Production::new(
                "Sequence",
                vec![
                    vec![GrammarSymbol::prod("Item")],
                    vec![GrammarSymbol::prod("Sequence"), GrammarSymbol::prod("Item")],
                ],
            ),
            Production::new("Item", vec![vec![ident], vec![string]]),
        ],
        "MetaGoal",
    )
}

/// Lower a `MetaGoal` parse tree to interchange-form productions.
///
/// Tolerant of shape mismatches (an unexpected child is skipped): the tree
/// was produced by [`ebnf_grammar`], so the shapes are fixed.
pub fn productions_from_tree(goal: &ParseNode) -> Vec<ProductionJson> {
    let mut out = Vec::new();
    if let Some(ParseItem::Node(list)) = goal.child(1) {
        collect_productions(list, &mut out);
    }
    out
}

fn collect_productions(list: &ParseNode, out: &mut Vec<ProductionJson>) {
    match list.children.as_slice() {
        [ParseItem::Node(production)] if production.name == "Production" => {
            out.push(production_json(production));
        }
        [ParseItem::Node(rest), ParseItem::Node(production)] => {
            collect_productions(rest, out);
            out.push(production_json(production));
        }
        _ => {}
    }
}

fn production_json(production: &ParseNode) -> ProductionJson {
    let name = production.child(0).map(ParseItem::source).unwrap_or_default();
    let mut defn = Vec::new();
    if let Some(ParseItem::Node(definition)) = production.child(2) {
        collect_sequences(definition, &mut defn);
    }
    ProductionJson { name, defn }
}

fn collect_sequences(definition: &ParseNode, out: &mut Vec<Vec<SymbolJson>>) {
    match definition.children.as_slice() {
        [ParseItem::Node(sequence)] => {
            let mut items = Vec::new();
            collect_items(sequence, &mut items);
            out.push(items);
        }
        [ParseItem::Node(rest), ParseItem::Token(_), ParseItem::Node(sequence)] => {
            collect_sequences(rest, out);
            let mut items = Vec::new();
            collect_items(sequence, &mut items);
            out.push(items);
        }
        _ => {}
    }
}

fn collect_items(sequence: &ParseNode, out: &mut Vec<SymbolJson>) {
    match sequence.children.as_slice() {
        [ParseItem::Node(item)] if item.name == "Item" => out.push(item_json(item)),
        [ParseItem::Node(rest), ParseItem::Node(item)] => {
            collect_items(rest, out);
            out.push(item_json(item));
        }
        _ => {}
    }
}

fn item_json(item: &ParseNode) -> SymbolJson {
    match item.child(0) {
        Some(ParseItem::Token(screened)) => match &screened.cooked {
            // A string literal's cooked code units are the terminal text.
            Cooked::CodeUnits(units) => {
                SymbolJson::Literal(String::from_utf8_lossy(units).into_owned())
            }
            _ => {
                let text = screened.token.text.clone();
                if Terminal::from_name(&text).is_some() {
                    SymbolJson::Term { term: text }
                } else {
                    SymbolJson::Prod { prod: text }
                }
            }
        },
        _ => SymbolJson::Prod {
            prod: String::new(),
        },
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use solid_ir::SolidConfig;
    use solid_lexer::{Lexer, Screener};
    use solid_scan::Scanner;

    use crate::parser::Parser;
    use crate::symbol::TerminalSymbol;

    fn parse_meta(source: &str) -> ParseNode {
        let config = SolidConfig::default();
        let scanner = Scanner::new(source);
        let screener = Screener::new(Lexer::new(&scanner, &config).generate());
        let grammar = ebnf_grammar();
        match Parser::new(&grammar, screener).parse() {
            Ok(node) => node,
            Err(err) => panic!("meta parse failed: {err}"),
        }
    }

    // === Parsing ===

    #[test]
    fn parses_single_production() {
        let node = parse_meta("sum : sum '+' NUMBER / NUMBER ;");
        assert_eq!(node.name, "MetaGoal");
        let described = productions_from_tree(&node);
        assert_eq!(
            described,
            vec![ProductionJson {
                name: "sum".into(),
                defn: vec![
                    vec![
                        SymbolJson::Prod { prod: "sum".into() },
                        SymbolJson::Literal("+".into()),
                        SymbolJson::Term {
                            term: "NUMBER".into()
                        },
                    ],
                    vec![SymbolJson::Term {
                        term: "NUMBER".into()
                    }],
                ],
            }]
        );
    }

    #[test]
    fn parses_multiple_productions() {
        let node = parse_meta("a : b ;\nb : NUMBER ;");
        let described = productions_from_tree(&node);
        let names: Vec<&str> = described.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // === Genericity: described grammar drives the engine ===

    #[test]
    fn described_grammar_computes_first_sets() {
        let node = parse_meta("sum : sum '+' NUMBER / NUMBER ;");
        let productions: Vec<Production> = productions_from_tree(&node)
            .iter()
            .map(|p| p.to_production().unwrap())
            .collect();
        let grammar = Grammar::new(productions, "sum");
        let first = grammar.first(&GrammarSymbol::prod("sum"));
        assert_eq!(
            first,
            std::collections::BTreeSet::from([TerminalSymbol::Term(Terminal::Number)])
        );
    }

    #[test]
    fn described_grammar_parses_token_streams() {
        // Describe a tiny goal grammar in EBNF source, lower it, and parse
        // Solid tokens with the result.
        let node = parse_meta("goal : sum ;\nsum : sum '+' NUMBER / NUMBER ;");
        // The sentinel chars cannot be written in EBNF source, so splice the
        // filebound brackets into the goal production afterwards.
        let mut described = productions_from_tree(&node);
        described[0].defn = vec![vec![
            SymbolJson::Literal("\u{2}".into()),
            SymbolJson::Prod { prod: "sum".into() },
            SymbolJson::Literal("\u{3}".into()),
        ]];
        let productions: Vec<Production> = described
            .iter()
            .map(|p| p.to_production().unwrap())
            .collect();
        let grammar = Grammar::new(productions, "goal");

        let config = SolidConfig::default();
        let scanner = Scanner::new("1 + 2 + 3");
        let screener = Screener::new(Lexer::new(&scanner, &config).generate());
        let goal = Parser::new(&grammar, screener).parse().unwrap();
        let ParseItem::Node(sum) = &goal.children[1] else {
            panic!("expected sum node");
        };
        assert_eq!(sum.source(), "1 + 2 + 3");
    }
}
