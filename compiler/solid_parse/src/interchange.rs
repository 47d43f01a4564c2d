//! JSON grammar-description interchange.
//!
//! Productions serialize as `{ "name": …, "defn": [[symbol, …], …] }` where
//! each symbol is a literal string, `{ "term": name }`, or `{ "prod": name }`.
//! This is the exchange format between the meta-grammar tooling and
//! generated production code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionJson {
    pub name: String,
    pub defn: Vec<Vec<SymbolJson>>,
}

/// One grammar symbol in interchange form. Untagged: a bare string is a
/// literal, objects are discriminated by their single key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolJson {
    Literal(String),
    Term { term: String },
    Prod { prod: String },
}

/// Interchange decoding failure.
#[derive(Debug)]
pub enum InterchangeError {
    /// Malformed JSON.
    Json(serde_json::Error),
    /// A `term` name that maps to no token class.
    UnknownTerminal { production: String, term: String },
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::Json(err) => write!(f, "malformed grammar description: {err}"),
            InterchangeError::UnknownTerminal { production, term } => {
                write!(
                    f,
                    "unknown terminal class `{term}` in production `{production}`"
                )
            }
        }
    }
}

impl std::error::Error for InterchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterchangeError::Json(err) => Some(err),
            InterchangeError::UnknownTerminal { .. } => None,
        }
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(err: serde_json::Error) -> Self {
        InterchangeError::Json(err)
    }
}

impl ProductionJson {
    pub fn from_production(production: &Production) -> ProductionJson {
        ProductionJson {
            name: production.name.clone(),
            defn: production
                .sequences
                .iter()
                .map(|sequence| sequence.iter().map(symbol_to_json).collect())
                .collect(),
        }
    }

    pub fn to_production(&self) -> Result<Production, InterchangeError> {
        let mut sequences = Vec::with_capacity(self.defn.len());
        for sequence in &self.defn {
            let mut symbols = Vec::with_capacity(sequence.len());
            for symbol in sequence {
                symbols.push(self.symbol_from_json(symbol)?);
            }
            sequences.push(symbols);
        }
        Ok(Production::new(self.name.clone(), sequences))
    }

    fn symbol_from_json(&self, symbol: &SymbolJson) -> Result<GrammarSymbol, InterchangeError> {
        match symbol {
            SymbolJson::Literal(text) => Ok(GrammarSymbol::Literal(text.clone())),
            SymbolJson::Term { term } => match Terminal::from_name(term) {
                Some(terminal) => Ok(GrammarSymbol::Term(terminal)),
                None => Err(InterchangeError::UnknownTerminal {
                    production: self.name.clone(),
                    term: term.clone(),
                }),
            },
            SymbolJson::Prod { prod } => Ok(GrammarSymbol::prod(prod.clone())),
        }
    }
}

fn symbol_to_json(symbol: &GrammarSymbol) -> SymbolJson {
    match symbol {
        GrammarSymbol::Literal(text) => SymbolJson::Literal(text.clone()),
        GrammarSymbol::Term(terminal) => SymbolJson::Term {
            term: terminal.tagname().to_owned(),
        },
        GrammarSymbol::Prod(name) => SymbolJson::Prod { prod: name.clone() },
    }
}

/// Decode a JSON array of production descriptions.
pub fn decode_productions(json: &str) -> Result<Vec<Production>, InterchangeError> {
    let described: Vec<ProductionJson> = serde_json::from_str(json)?;
    described.iter().map(ProductionJson::to_production).collect()
}

/// Encode productions as a pretty-printed JSON array.
pub fn encode_productions(productions: &[Production]) -> Result<String, InterchangeError> {
    let described: Vec<ProductionJson> = productions
        .iter()
        .map(ProductionJson::from_production)
        .collect();
    Ok(serde_json::to_string_pretty(&described)?)
}
