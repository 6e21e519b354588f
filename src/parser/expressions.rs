//! Expression parsing implementation
//!
//! The language has no operator precedence: an expression is a flat
//! sequence of terms separated by binary operators, evaluated strictly left
//! to right. The parser keeps that sequence as-is, so every operator and
//! operand is a direct child of one `expression` node in source order.
//! Grouping only happens through parentheses and unary operators, both of
//! which nest inside a `term`.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | identifier
//!                  | identifier "[" expression "]"
//!                  | identifier "(" expressionList ")"
//!                  | identifier "." identifier "(" expressionList ")"
//!                  | "(" expression ")"
//!                  | unaryOp term
//! expressionList ::= (expression ("," expression)*)?
//! op             ::= "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "="
//! unaryOp        ::= "-" | "~"
//! keywordConstant ::= "true" | "false" | "null" | "this"
//! ```
//!
//! The token after an identifier decides between a variable, an indexed
//! access and the two call forms.
//!
//! All parsing methods are implemented as `pub` methods on the [`Parser`] struct.

use crate::parser::ast::{NodeKind, ParseTree};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};

pub const BINARY_OPERATORS: &[&str] = &["+", "-", "*", "/", "&", "|", "<", ">", "="];
pub const UNARY_OPERATORS: &[&str] = &["-", "~"];
pub const KEYWORD_CONSTANTS: &[&str] = &["true", "false", "null", "this"];

impl Parser {
    /// Parse expression: a term followed by any number of (op, term) pairs
    pub fn compile_expression(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::Expression);

        tree.add_child(self.compile_term()?);
        while self.matches_any(TokenKind::Symbol, BINARY_OPERATORS) {
            tree.add_token(self.expect_one_of(TokenKind::Symbol, BINARY_OPERATORS)?);
            tree.add_child(self.compile_term()?);
        }

        Ok(tree)
    }

    /// Parse a single term. Each term counts one level toward the nesting limit.
    pub fn compile_term(&mut self) -> Result<ParseTree, ParseError> {
        self.nested(Self::compile_term_body)
    }

    fn compile_term_body(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::Term);

        match self.stream.current().map(|t| t.kind) {
            Some(kind @ (TokenKind::IntegerConstant | TokenKind::StringConstant)) => {
                tree.add_token(self.expect_kind(kind)?);
            }
            Some(TokenKind::Keyword) if self.matches_any(TokenKind::Keyword, KEYWORD_CONSTANTS) => {
                tree.add_token(self.expect_one_of(TokenKind::Keyword, KEYWORD_CONSTANTS)?);
            }
            Some(TokenKind::Identifier) => {
                self.compile_identifier_term(&mut tree)?;
            }
            Some(TokenKind::Symbol) if self.matches_symbol("(") => {
                tree.add_token(self.expect_symbol("(")?);
                tree.add_child(self.compile_expression()?);
                tree.add_token(self.expect_symbol(")")?);
            }
            Some(TokenKind::Symbol) if self.matches_any(TokenKind::Symbol, UNARY_OPERATORS) => {
                tree.add_token(self.expect_one_of(TokenKind::Symbol, UNARY_OPERATORS)?);
                tree.add_child(self.compile_term()?);
            }
            _ => return Err(self.violation(Expected::Term)),
        }

        Ok(tree)
    }

    /// Variable, indexed access, or one of the two call forms
    fn compile_identifier_term(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_identifier()?);

        if self.matches_symbol("[") {
            tree.add_token(self.expect_symbol("[")?);
            tree.add_child(self.compile_expression()?);
            tree.add_token(self.expect_symbol("]")?);
        } else if self.matches_symbol("(") {
            self.compile_arguments(tree)?;
        } else if self.matches_symbol(".") {
            tree.add_token(self.expect_symbol(".")?);
            tree.add_token(self.expect_identifier()?);
            self.compile_arguments(tree)?;
        }

        Ok(())
    }

    /// `( expressionList )`
    fn compile_arguments(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_symbol("(")?);
        tree.add_child(self.compile_expression_list()?);
        tree.add_token(self.expect_symbol(")")?);
        Ok(())
    }

    /// Parse a possibly empty comma-separated list of expressions
    pub fn compile_expression_list(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::ExpressionList);

        if self.is_at_end() || self.matches_symbol(")") {
            return Ok(tree);
        }

        tree.add_child(self.compile_expression()?);
        while self.matches_symbol(",") {
            tree.add_token(self.expect_symbol(",")?);
            tree.add_child(self.compile_expression()?);
        }

        Ok(tree)
    }
}
