//! Statement parsing implementation
//!
//! This module handles the statement block and the five statement forms:
//!
//! - `let name = expr;` and `let name[index] = expr;`
//! - `if (cond) { ... }` with an optional `else { ... }`
//! - `while (cond) { ... }`
//! - `do call;`
//! - `return;` and `return expr;`
//!
//! # Grammar
//!
//! ```text
//! statements ::= statement*
//! statement  ::= let | if | while | do | return
//! let        ::= "let" identifier ("[" expression "]")? "=" expression ";"
//! if         ::= "if" "(" expression ")" "{" statements "}"
//!                ("else" "{" statements "}")?
//! while      ::= "while" "(" expression ")" "{" statements "}"
//! do         ::= "do" subroutineCall ";"
//! return     ::= "return" expression? ";"
//! ```
//!
//! A block ends at the first token that does not start a statement; the
//! enclosing production then expects its closing `}`.
//!
//! All parsing methods are implemented as `pub` methods on the [`Parser`] struct.

use crate::parser::ast::{NodeKind, ParseTree};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};

impl Parser {
    /// Parse statements until a token that starts none of them
    pub fn compile_statements(&mut self) -> Result<ParseTree, ParseError> {
        self.nested(Self::compile_statements_body)
    }

    fn compile_statements_body(&mut self) -> Result<ParseTree, ParseError> {
        tracing::trace!("statements");
        let mut tree = ParseTree::new(NodeKind::Statements);

        loop {
            let statement = if self.matches_keyword("let") {
                self.compile_let()?
            } else if self.matches_keyword("do") {
                self.compile_do()?
            } else if self.matches_keyword("return") {
                self.compile_return()?
            } else if self.matches_keyword("while") {
                self.compile_while()?
            } else if self.matches_keyword("if") {
                self.compile_if()?
            } else {
                break;
            };
            tree.add_child(statement);
        }

        Ok(tree)
    }

    /// Parse let statement
    pub fn compile_let(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::LetStatement);

        tree.add_token(self.expect_keyword("let")?);
        tree.add_token(self.expect_identifier()?);

        if self.matches_symbol("[") {
            tree.add_token(self.expect_symbol("[")?);
            tree.add_child(self.compile_expression()?);
            tree.add_token(self.expect_symbol("]")?);
        }

        tree.add_token(self.expect_symbol("=")?);
        tree.add_child(self.compile_expression()?);
        tree.add_token(self.expect_symbol(";")?);

        Ok(tree)
    }

    /// Parse if statement
    pub fn compile_if(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::IfStatement);

        tree.add_token(self.expect_keyword("if")?);
        self.compile_condition(&mut tree)?;
        self.compile_block(&mut tree)?;

        if self.matches_keyword("else") {
            tree.add_token(self.expect_keyword("else")?);
            self.compile_block(&mut tree)?;
        }

        Ok(tree)
    }

    /// Parse while statement
    pub fn compile_while(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::WhileStatement);

        tree.add_token(self.expect_keyword("while")?);
        self.compile_condition(&mut tree)?;
        self.compile_block(&mut tree)?;

        Ok(tree)
    }

    /// Parse do statement. The expression must be a bare subroutine call.
    pub fn compile_do(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::DoStatement);

        tree.add_token(self.expect_keyword("do")?);

        let is_call = self.matches_kind(TokenKind::Identifier)
            && (self.peek_is(1, TokenKind::Symbol, "(") || self.peek_is(1, TokenKind::Symbol, "."));
        if !is_call {
            return Err(self.violation(Expected::SubroutineCall));
        }

        let mut call = ParseTree::new(NodeKind::Expression);
        call.add_child(self.compile_term()?);
        tree.add_child(call);
        tree.add_token(self.expect_symbol(";")?);

        Ok(tree)
    }

    /// Parse return statement
    pub fn compile_return(&mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(NodeKind::ReturnStatement);

        tree.add_token(self.expect_keyword("return")?);
        if !self.matches_symbol(";") {
            tree.add_child(self.compile_expression()?);
        }
        tree.add_token(self.expect_symbol(";")?);

        Ok(tree)
    }

    /// `( expression )`
    fn compile_condition(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_symbol("(")?);
        tree.add_child(self.compile_expression()?);
        tree.add_token(self.expect_symbol(")")?);
        Ok(())
    }

    /// `{ statements }`
    fn compile_block(&mut self, tree: &mut ParseTree) -> Result<(), ParseError> {
        tree.add_token(self.expect_symbol("{")?);
        tree.add_child(self.compile_statements()?);
        tree.add_token(self.expect_symbol("}")?);
        Ok(())
    }
}
