//! The Solid language grammar.
//!
//! Operator precedence is baked into the production hierarchy: each tier
//! references the next-tighter tier, with left recursion for
//! left-associative operators and right recursion for exponentiation.

use solid_scan::{ETX, STX};

use crate::grammar::Grammar;
use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal};

fn lits(texts: &[&str]) -> Vec<Vec<GrammarSymbol>> {
    texts.iter().map(|t| vec![GrammarSymbol::lit(*t)]).collect()
}

/// Build the Solid grammar. Goal production: `Goal`.
pub fn solid_grammar() -> Grammar {
    let stx = GrammarSymbol::lit(STX.to_string());
    let etx = GrammarSymbol::lit(ETX.to_string());
    let ident = GrammarSymbol::Term(Terminal::Identifier);

    Grammar::new(
        vec![
            Production::new(
                "Goal",
                vec![
                    vec![stx.clone(), etx.clone()],
                    vec![stx, GrammarSymbol::prod("StatementList"), etx],
                ],
            ),
            Production::new(
                "StatementList",
                vec![
                    vec![GrammarSymbol::prod("Statement")],
                    vec![
                        GrammarSymbol::prod("StatementList"),
                        GrammarSymbol::prod("Statement"),
                    ],
                ],
            ),
            Production::new(
                "Statement",
                vec![
                    vec![GrammarSymbol::prod("Declaration"), GrammarSymbol::lit(";")],
                    vec![GrammarSymbol::prod("Assignment"), GrammarSymbol::lit(";")],
                    vec![GrammarSymbol::prod("Expression"), GrammarSymbol::lit(";")],
                ],
            ),
            Production::new(
                "Declaration",
                vec![
                    vec![
                        GrammarSymbol::lit("let"),
                        GrammarSymbol::prod("Binding"),
                        GrammarSymbol::lit("="),
                        GrammarSymbol::prod("Expression"),
                    ],
                    vec![
                        GrammarSymbol::lit("let"),
                        GrammarSymbol::lit("unfixed"),
                        GrammarSymbol::prod("Binding"),
                        GrammarSymbol::lit("="),
                        GrammarSymbol::prod("Expression"),
                    ],
                ],
            ),
            Production::new(
                "Binding",
                vec![
                    vec![ident.clone()],
                    vec![
                        ident.clone(),
                        GrammarSymbol::lit(":"),
                        GrammarSymbol::prod("TypeName"),
                    ],
                ],
            ),
            Production::new(
                "TypeName",
                lits(&[
                    "bool", "int", "float", "str", "obj", "void", "unknown", "never", "null",
                ]),
            ),
            Production::new(
                "Assignment",
                vec![vec![
                    ident.clone(),
                    GrammarSymbol::prod("AssignOp"),
                    GrammarSymbol::prod("Expression"),
                ]],
            ),
            Production::new(
                "AssignOp",
                lits(&["=", "+=", "-=", "*=", "/=", "^=", "&&=", "||="]),
            ),
            Production::new(
                "Expression",
                vec![
                    vec![GrammarSymbol::prod("Disjunction")],
                    vec![
                        GrammarSymbol::lit("if"),
                        GrammarSymbol::prod("Expression"),
                        GrammarSymbol::lit("then"),
                        GrammarSymbol::prod("Expression"),
                        GrammarSymbol::lit("else"),
                        GrammarSymbol::prod("Expression"),
                    ],
                ],
            ),
            Production::new(
                "Disjunction",
                vec![
                    vec![GrammarSymbol::prod("Conjunction")],
                    vec![
                        GrammarSymbol::prod("Disjunction"),
                        GrammarSymbol::lit("||"),
                        GrammarSymbol::prod("Conjunction"),
                    ],
                ],
            ),
            Production::new(
                "Conjunction",
                vec![
                    vec![GrammarSymbol::prod("Comparison")],
                    vec![
                        GrammarSymbol::prod("Conjunction"),
                        GrammarSymbol::lit("&&"),
                        GrammarSymbol::prod("Comparison"),
                    ],
                ],
            ),
            Production::new(
                "Comparison",
                vec![
                    vec![GrammarSymbol::prod("Additive")],
                    vec![
                        GrammarSymbol::prod("Comparison"),
                        GrammarSymbol::prod("CompareOp"),
                        GrammarSymbol::prod("Additive"),
                    ],
                ],
            ),
            Production::new(
                "CompareOp",
                lits(&["<", ">", "<=", ">=", "==", "!=", "!<", "!>", "is", "isnt"]),
            ),
            Production::new(
                "Additive",
                vec![
                    vec![GrammarSymbol::prod("Multiplicative")],
                    vec![
                        GrammarSymbol::prod("Additive"),
                        GrammarSymbol::lit("+"),
                        GrammarSymbol::prod("Multiplicative"),
                    ],
                    vec![
                        GrammarSymbol::prod("Additive"),
                        GrammarSymbol::lit("-"),
                        GrammarSymbol::prod("Multiplicative"),
                    ],
                ],
            ),
            Production::new(
                "Multiplicative",
                vec![
                    vec![GrammarSymbol::prod("Exponential")],
                    vec![
                        GrammarSymbol::prod("Multiplicative"),
                        GrammarSymbol::lit("*"),
                        GrammarSymbol::prod("Exponential"),
                    ],
                    vec![
                        GrammarSymbol::prod("Multiplicative"),
                        GrammarSymbol::lit("/"),
                        GrammarSymbol::prod("Exponential"),
                    ],
                ],
            ),
            Production::new(
                "Exponential",
                vec![
                    vec![GrammarSymbol::prod("Unary")],
                    vec![
                        GrammarSymbol::prod("Unary"),
                        GrammarSymbol::lit("^"),
                        GrammarSymbol::prod("Exponential"),
                    ],
                ],
            ),
            Production::new(
                "Unary",
                vec![
                    vec![GrammarSymbol::prod("Primary")],
                    vec![GrammarSymbol::lit("!"), GrammarSymbol::prod("Unary")],
                    vec![GrammarSymbol::lit("-"), GrammarSymbol::prod("Unary")],
                ],
            ),
            Production::new(
                "Primary",
                vec![
                    vec![GrammarSymbol::Term(Terminal::Number)],
                    vec![GrammarSymbol::Term(Terminal::Str)],
                    vec![ident],
                    vec![GrammarSymbol::lit("true")],
                    vec![GrammarSymbol::lit("false")],
                    vec![GrammarSymbol::lit("null")],
                    vec![
                        GrammarSymbol::lit("("),
                        GrammarSymbol::prod("Expression"),
                        GrammarSymbol::lit(")"),
                    ],
                    vec![GrammarSymbol::prod("Template")],
                ],
            ),
            Production::new(
                "Template",
                vec![
                    vec![GrammarSymbol::Term(Terminal::TemplateFull)],
                    vec![
                        GrammarSymbol::Term(Terminal::TemplateHead),
                        GrammarSymbol::prod("TemplateSpans"),
                        GrammarSymbol::Term(Terminal::TemplateTail),
                    ],
                ],
            ),
            Production::new(
                "TemplateSpans",
                vec![
                    vec![GrammarSymbol::prod("Expression")],
                    vec![
                        GrammarSymbol::prod("TemplateSpans"),
                        GrammarSymbol::Term(Terminal::TemplateMiddle),
                        GrammarSymbol::prod("Expression"),
                    ],
                ],
            ),
        ],
        "Goal",
    )
}
