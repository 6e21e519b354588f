//! Declaration parsing implementation
//!
//! This module handles the structural productions of a Jack class:
//!
//! - The minimal program shape: `class Name { }`
//! - Class bodies with field/static declarations and subroutines
//! - Subroutine headers, parameter lists and bodies
//! - Local `var` declarations
//!
//! # Grammar
//!
//! ```text
//! program        ::= "class" identifier? "{" "}"
//! class          ::= "class" identifier? "{" (classVarDec | subroutine)* "}"
//! classVarDec    ::= ("static" | "field") primitive identifier ("," identifier)* ";"
//! subroutine     ::= ("constructor" | "function" | "method") ("void" | type)
//!                    identifier "(" parameterList ")" subroutineBody
//! parameterList  ::= (type identifier ("," type identifier)*)?
//! subroutineBody ::= "{" varDec* statements "}"
//! varDec         ::= "var" type identifier ("," identifier)* ";"
//! type           ::= "int" | "char" | "boolean" | className
//! ```
//!
//! The class name is optional in both `program` and `class`. Which
//! identifiers count as `className` is decided by
//! [`TypeNamePolicy`](crate::parser::config::TypeNamePolicy).
//!
//! All parsing methods are implemented as `pub` methods on the [`Parser`] struct.

use crate::parser::ast::{NodeKind, ParseTree};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{Expected, ParseError, Parser};

/// Type keywords accepted everywhere a type may appear
pub const PRIMITIVE_TYPES: &[&str] = &["int", "char", "boolean"];

const CLASS_VAR_KINDS: &[&str] = &["static", "field"];
const SUBROUTINE_KINDS: &[&str] = &["constructor", "function", "method"];

impl Parser {
    /// Parse the minimal program shape: `class Name? { }`
    pub fn compile_program(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("program");
        let mut tree = ParseTree::new(NodeKind::Class);

        self.compile_class_header(&mut tree)?;
        tree.add_token(self.expect_symbol("}")?);

        Ok(tree)
    }

    /// Parse a class with its members
    pub fn compile_class(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("class");
        let mut tree = ParseTree::new(NodeKind::Class);

        self.compile_class_header(&mut tree)?;

        // Any token that cannot start a member ends the loop; the closing
        // brace below is what rejects stray input.
        loop {
            if self.matches_any(TokenKind::Keyword, CLASS_VAR_KINDS) {
                tree.add_child(self.compile_class_var_dec()?);
            } else if self.matches_any(TokenKind::Keyword, SUBROUTINE_KINDS) {
                tree.add_child(self.compile_subroutine()?);
            } else {
                break;
            }
        }

        tree.add_token(self.expect_symbol("}")?);
        Ok(tree)
    }

    /// `class`, optional name, `{`
    fn compile_class_header(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_keyword("class")?);
        if self.matches_kind(TokenKind::Identifier) {
            tree.add_token(self.expect_identifier()?);
        }
        tree.add_token(self.expect_symbol("{")?);
        Ok(())
    }

    /// Parse a static or field declaration
    pub fn compile_class_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("classVarDec");
        let mut tree = ParseTree::new(NodeKind::ClassVarDec);

        tree.add_token(self.expect_one_of(TokenKind::Keyword, CLASS_VAR_KINDS)?);
        // Class types are not accepted for fields and statics
        tree.add_token(self.expect_one_of(TokenKind::Keyword, PRIMITIVE_TYPES)?);
        self.compile_name_list(&mut tree)?;
        tree.add_token(self.expect_symbol(";")?);

        Ok(tree)
    }

    /// Parse a constructor, function or method declaration
    pub fn compile_subroutine(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("subroutine");
        let mut tree = ParseTree::new(NodeKind::Subroutine);

        tree.add_token(self.expect_one_of(TokenKind::Keyword, SUBROUTINE_KINDS)?);
        tree.add_token(self.expect_type(true)?);
        tree.add_token(self.expect_identifier()?);
        tree.add_token(self.expect_symbol("(")?);
        tree.add_child(self.compile_parameter_list()?);
        tree.add_token(self.expect_symbol(")")?);
        tree.add_child(self.compile_subroutine_body()?);

        Ok(tree)
    }

    /// Parse a possibly empty parameter list, without the parentheses
    pub fn compile_parameter_list(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("parameterList");
        let mut tree = ParseTree::new(NodeKind::ParameterList);

        if self.is_at_end() || self.matches_symbol(")") {
            return Ok(tree);
        }

        self.compile_parameter(&mut tree)?;
        while self.matches_symbol(",") {
            tree.add_token(self.expect_symbol(",")?);
            self.compile_parameter(&mut tree)?;
        }

        Ok(tree)
    }

    fn compile_parameter(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_type(false)?);
        tree.add_token(self.expect_identifier()?);
        Ok(())
    }

    /// Parse `{ varDec* statements }`
    pub fn compile_subroutine_body(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("subroutineBody");
        let mut tree = ParseTree::new(NodeKind::SubroutineBody);

        tree.add_token(self.expect_symbol("{")?);
        while self.matches_keyword("var") {
            tree.add_child(self.compile_var_dec()?);
        }
        tree.add_child(self.compile_statements()?);
        tree.add_token(self.expect_symbol("}")?);

        Ok(tree)
    }

    /// Parse a local variable declaration.
    ///
    /// Returns an empty `varDec` node without consuming anything when the
    /// current token is not `var`, so callers may try it speculatively.
    pub fn compile_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::VarDec);
        if !self.matches_keyword("var") {
            return Ok(tree);
        }
        tracing::trace!("varDec");

        tree.add_token(self.expect_keyword("var")?);
        tree.add_token(self.expect_type(false)?);
        self.compile_name_list(&mut tree)?;
        tree.add_token(self.expect_symbol(";")?);

        Ok(tree)
    }

    /// `identifier ("," identifier)*`
    fn compile_name_list(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_identifier()?);
        while self.matches_symbol(",") {
            tree.add_token(self.expect_symbol(",")?);
            tree.add_token(self.expect_identifier()?);
        }
        Ok(())
    }

    /// Consume a type: a primitive keyword, `void` when allowed, or an
    /// identifier accepted by the configured type name policy
    pub(crate) fn expect_type(&mut self, allow_void: bool) -> Result<Token, ParseError> {
        let accepted = match self.stream.current() {
            Some(t) if t.kind == TokenKind::Keyword => {
                PRIMITIVE_TYPES.contains(&t.text.as_str()) || (allow_void && t.text == "void")
            }
            Some(t) if t.kind == TokenKind::Identifier => self.config.type_names.accepts(&t.text),
            _ => false,
        };

        self.take_if(|_| accepted)
            .ok_or_else(|| self.violation(Expected::Type))
    }
}
