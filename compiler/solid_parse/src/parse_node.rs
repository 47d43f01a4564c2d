//! Parse-tree nodes: fixed-shape tuples of tokens and child nodes.

use std::fmt;

use solid_lexer::Screened;

/// One slot of a parse node: a screened token or a nested node.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseItem {
    Token(Screened),
    Node(ParseNode),
}

impl ParseItem {
    /// The item's literal source text. Node sources join their children's
    /// sources with single spaces, so trivia spacing is not preserved.
    pub fn source(&self) -> String {
        match self {
            ParseItem::Token(screened) => screened.token.text.clone(),
            ParseItem::Node(node) => node.source(),
        }
    }

    /// Display tag: token tagname or production display name.
    pub fn tagname(&self) -> &str {
        match self {
            ParseItem::Token(screened) => screened.tagname(),
            ParseItem::Node(node) => &node.name,
        }
    }

    /// Zero-based line/col of the item's first character.
    pub fn position(&self) -> (i32, u32) {
        match self {
            ParseItem::Token(screened) => (screened.token.line_index, screened.token.col_index),
            ParseItem::Node(node) => (node.line_index, node.col_index),
        }
    }
}

/// A nonterminal parse-tree node.
///
/// The child shape is fixed by the rule that produced it: one slot per
/// rule symbol, in order. Position is the first child's position.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseNode {
    /// The producing production's display name.
    pub name: String,
    pub children: Vec<ParseItem>,
    pub line_index: i32,
    pub col_index: u32,
}

impl ParseNode {
    /// Build a node over `children` (position taken from the first child).
    pub fn new(name: impl Into<String>, children: Vec<ParseItem>) -> Self {
        let (line_index, col_index) = children.first().map_or((0, 0), ParseItem::position);
        ParseNode {
            name: name.into(),
            children,
            line_index,
            col_index,
        }
    }

    /// Children's sources joined with single spaces.
    pub fn source(&self) -> String {
        let parts: Vec<String> = self.children.iter().map(ParseItem::source).collect();
        parts.join(" ")
    }

    pub fn child(&self, index: usize) -> Option<&ParseItem> {
        self.children.get(index)
    }

    /// Flat S-expression rendering, for tests and debugging.
    pub fn sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.name);
        for child in &self.children {
            out.push(' ');
            match child {
                ParseItem::Token(screened) => out.push_str(&screened.token.text),
                ParseItem::Node(node) => node.write_sexpr(out),
            }
        }
        out.push(')');
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use solid_ir::{Cooked, Span, Token, TokenKind};

    fn item(text: &str, line: i32, col: u32) -> ParseItem {
        ParseItem::Token(Screened {
            token: Token::new(TokenKind::IdentifierBasic, text, Span::DUMMY, line, col),
            cooked: Cooked::Integer(256),
        })
    }

    // === Shape & Source ===

    #[test]
    fn source_joins_children_with_spaces() {
        let node = ParseNode::new("Pair", vec![item("a", 0, 0), item("b", 0, 2)]);
        assert_eq!(node.source(), "a b");
        assert_eq!(node.sexpr(), "(Pair a b)");
    }

    #[test]
    fn position_is_first_child() {
        let inner = ParseNode::new("Inner", vec![item("x", 3, 7)]);
        let node = ParseNode::new("Outer", vec![ParseItem::Node(inner), item("y", 4, 0)]);
        assert_eq!((node.line_index, node.col_index), (3, 7));
    }

    #[test]
    fn nested_source_flattens() {
        let inner = ParseNode::new("Inner", vec![item("x", 0, 0), item("y", 0, 2)]);
        let node = ParseNode::new("Outer", vec![ParseItem::Node(inner), item("z", 0, 4)]);
        assert_eq!(node.source(), "x y z");
        assert_eq!(node.sexpr(), "(Outer (Inner x y) z)");
    }
}
