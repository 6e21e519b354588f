// Parse tree definitions for the Jack syntax analyzer

use super::lexer::{Token, TokenKind};
use serde::{Serialize, Serializer};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Label of a parse tree node: a grammar production, or the kind of the
/// token held by a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Program structure
    Class,
    ClassVarDec,
    Subroutine,
    ParameterList,
    SubroutineBody,
    VarDec,

    // Statements
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,

    // Expressions
    Expression,
    Term,
    ExpressionList,

    // Leaves
    Token(TokenKind),
}

impl NodeKind {
    /// The label as it appears in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::ClassVarDec => "classVarDec",
            NodeKind::Subroutine => "subroutine",
            NodeKind::ParameterList => "parameterList",
            NodeKind::SubroutineBody => "subroutineBody",
            NodeKind::VarDec => "varDec",
            NodeKind::Statements => "statements",
            NodeKind::LetStatement => "letStatement",
            NodeKind::IfStatement => "ifStatement",
            NodeKind::WhileStatement => "whileStatement",
            NodeKind::DoStatement => "doStatement",
            NodeKind::ReturnStatement => "returnStatement",
            NodeKind::Expression => "expression",
            NodeKind::Term => "term",
            NodeKind::ExpressionList => "expressionList",
            NodeKind::Token(kind) => kind.as_str(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Token(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node of the parse tree.
///
/// Interior nodes carry a production label, an empty value and the subtrees
/// built by that production. Leaves carry the kind and text of exactly one
/// consumed token and have no children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseTree {
    pub label: NodeKind,
    pub value: String,
    pub children: Vec<ParseTree>,
    /// Where the leaf's token came from, when the tokenizer recorded it
    #[serde(skip)]
    pub location: Option<SourceLocation>,
}

impl ParseTree {
    /// Create an empty interior node for a production
    pub fn new(label: NodeKind) -> Self {
        ParseTree {
            label,
            value: String::new(),
            children: Vec::new(),
            location: None,
        }
    }

    /// Create a leaf holding a consumed token
    pub fn leaf(token: Token) -> Self {
        ParseTree {
            label: NodeKind::Token(token.kind),
            value: token.text,
            children: Vec::new(),
            location: token.location,
        }
    }

    pub fn add_child(&mut self, child: ParseTree) {
        self.children.push(child);
    }

    /// Append a consumed token as a leaf
    pub fn add_token(&mut self, token: Token) {
        self.children.push(ParseTree::leaf(token));
    }

    pub fn is_leaf(&self) -> bool {
        self.label.is_leaf()
    }

    /// All leaves of the tree, left to right
    pub fn leaves(&self) -> Vec<&ParseTree> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ParseTree>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Texts of all leaves in order; for a successful parse this is exactly
    /// the consumed token texts
    pub fn leaf_values(&self) -> Vec<&str> {
        self.leaves().into_iter().map(|l| l.value.as_str()).collect()
    }

    /// Location of the first token under this node
    pub fn first_location(&self) -> Option<SourceLocation> {
        if self.is_leaf() {
            return self.location;
        }
        self.children.iter().find_map(|c| c.first_location())
    }

    /// Number of nodes in the subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseTree::node_count).sum::<usize>()
    }

    /// Children carrying the given label
    pub fn children_labeled(&self, label: NodeKind) -> impl Iterator<Item = &ParseTree> {
        self.children.iter().filter(move |c| c.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text)
    }

    #[test]
    fn test_leaf_from_token() {
        let leaf = ParseTree::leaf(tok(TokenKind::Identifier, "x"));
        assert_eq!(leaf.label, NodeKind::Token(TokenKind::Identifier));
        assert_eq!(leaf.value, "x");
        assert!(leaf.children.is_empty());
        assert!(leaf.is_leaf());
    }

    #[test]
    fn test_leaves_in_order() {
        let mut term = ParseTree::new(NodeKind::Term);
        term.add_token(tok(TokenKind::IntegerConstant, "1"));
        let mut expr = ParseTree::new(NodeKind::Expression);
        expr.add_child(term);
        expr.add_token(tok(TokenKind::Symbol, "+"));
        let mut rhs = ParseTree::new(NodeKind::Term);
        rhs.add_token(tok(TokenKind::Identifier, "y"));
        expr.add_child(rhs);

        assert_eq!(expr.leaf_values(), vec!["1", "+", "y"]);
        assert_eq!(expr.node_count(), 6);
        assert_eq!(expr.children_labeled(NodeKind::Term).count(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(NodeKind::LetStatement.as_str(), "letStatement");
        assert_eq!(
            NodeKind::Token(TokenKind::IntegerConstant).as_str(),
            "integerConstant"
        );
        assert!(!NodeKind::Statements.is_leaf());
    }

    #[test]
    fn test_first_location() {
        let mut node = ParseTree::new(NodeKind::Statements);
        assert_eq!(node.first_location(), None);
        let mut token = tok(TokenKind::Keyword, "return");
        token.location = Some(SourceLocation::new(4, 9));
        node.add_token(token);
        assert_eq!(node.first_location(), Some(SourceLocation::new(4, 9)));
    }
}
