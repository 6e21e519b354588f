//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, the match primitives and the parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar
//! production:
//! - This module: Parser struct, match primitives, and coordination
//! - `declarations`: class structure, class variables, subroutines, locals
//! - `statements`: the statement block and the five statement forms
//! - `expressions`: expressions, terms and expression lists
//!
//! # Match primitives
//!
//! Every production inspects input through [`Parser::matches`] (and its
//! kind-only sibling) and consumes input through [`Parser::expect`] (and
//! its kind-only and one-of siblings). A failed `expect` leaves the cursor
//! where it was and returns [`ParseError::GrammarViolation`]; productions
//! propagate it with `?` and never recover.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::{ParseTree, SourceLocation};
use crate::parser::config::ParserConfig;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::stream::TokenStream;
use std::fmt;
use thiserror::Error;

/// What a production required at the point it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// One exact token
    Token { kind: TokenKind, text: String },
    /// Any token of a kind (identifiers, constants)
    Kind(TokenKind),
    /// One of several texts of the same kind
    OneOf { kind: TokenKind, texts: Vec<String> },
    /// A primitive type keyword or a class type name
    Type,
    Term,
    SubroutineCall,
    EndOfInput,
    /// Terms or blocks nested past [`ParserConfig::max_depth`]
    ShallowerNesting { limit: usize },
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token { kind, text } => write!(f, "{} '{}'", kind, text),
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::OneOf { kind, texts } => {
                let quoted: Vec<String> = texts.iter().map(|t| format!("'{}'", t)).collect();
                write!(f, "{} {}", kind, quoted.join(" or "))
            }
            Expected::Type => write!(f, "a type"),
            Expected::Term => write!(f, "a term"),
            Expected::SubroutineCall => write!(f, "a subroutine call"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::ShallowerNesting { limit } => {
                write!(f, "nesting at most {} levels deep", limit)
            }
        }
    }
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => match token.location {
            Some(loc) => format!("found {} at {}", token, loc),
            None => format!("found {}", token),
        },
        None => "found end of input".to_string(),
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The current token satisfies no alternative of the active production.
    /// `found` is `None` when the stream was exhausted.
    #[error("expected {expected}, {}", describe_found(.found))]
    GrammarViolation {
        expected: Expected,
        found: Option<Token>,
    },
}

impl ParseError {
    pub fn expected(&self) -> &Expected {
        match self {
            ParseError::GrammarViolation { expected, .. } => expected,
        }
    }

    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::GrammarViolation { found, .. } => found.as_ref(),
        }
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.found().and_then(|t| t.location)
    }
}

/// Recursive descent parser for Jack
pub struct Parser {
    pub(crate) stream: TokenStream,
    pub(crate) config: ParserConfig,
    /// Terms and statement blocks currently open
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            config,
            depth: 0,
        }
    }

    /// Tokenize `source` and prepare a parser over the result
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse a whole compilation unit: one class and nothing after it
    pub fn parse_class(&mut self) -> Result<ParseTree, ParseError> {
        let tree = self.compile_class()?;
        self.expect_end()?;
        tracing::debug!(nodes = tree.node_count(), "parsed class");
        Ok(tree)
    }

    /// Parse the minimal `class Name { }` shape and nothing after it
    pub fn parse_program(&mut self) -> Result<ParseTree, ParseError> {
        let tree = self.compile_program()?;
        self.expect_end()?;
        Ok(tree)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        self.stream.remaining()
    }

    pub fn is_at_end(&self) -> bool {
        self.stream.is_exhausted()
    }

    // ===== Match primitives =====

    /// True iff the current token has exactly this kind and text
    pub fn matches(&self, kind: TokenKind, text: &str) -> bool {
        self.stream.current().is_some_and(|t| t.is(kind, text))
    }

    /// True iff the current token has this kind
    pub fn matches_kind(&self, kind: TokenKind) -> bool {
        self.stream.current().is_some_and(|t| t.kind == kind)
    }

    /// Consume the current token if it has exactly this kind and text
    pub fn expect(&mut self, kind: TokenKind, text: &str) -> Result<Token, ParseError> {
        self.take_if(|t| t.is(kind, text)).ok_or_else(|| {
            self.violation(Expected::Token {
                kind,
                text: text.to_string(),
            })
        })
    }

    /// Consume the current token if it has this kind, whatever its text
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.take_if(|t| t.kind == kind)
            .ok_or_else(|| self.violation(Expected::Kind(kind)))
    }

    /// Consume the current token if it matches any of `texts`
    pub fn expect_one_of(&mut self, kind: TokenKind, texts: &[&str]) -> Result<Token, ParseError> {
        self.take_if(|t| t.kind == kind && texts.iter().any(|text| t.text == *text))
            .ok_or_else(|| {
                self.violation(Expected::OneOf {
                    kind,
                    texts: texts.iter().map(|t| t.to_string()).collect(),
                })
            })
    }

    // ===== Helper methods =====

    pub(crate) fn matches_any(&self, kind: TokenKind, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.matches(kind, text))
    }

    pub(crate) fn matches_symbol(&self, text: &str) -> bool {
        self.matches(TokenKind::Symbol, text)
    }

    pub(crate) fn matches_keyword(&self, text: &str) -> bool {
        self.matches(TokenKind::Keyword, text)
    }

    pub(crate) fn expect_symbol(&mut self, text: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Symbol, text)
    }

    pub(crate) fn expect_keyword(&mut self, text: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Keyword, text)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token, ParseError> {
        self.expect_kind(TokenKind::Identifier)
    }

    /// Lookahead `n` tokens past the cursor
    pub(crate) fn peek_is(&self, n: usize, kind: TokenKind, text: &str) -> bool {
        self.stream.peek(n).is_some_and(|t| t.is(kind, text))
    }

    /// Build an error describing the current token
    pub(crate) fn violation(&self, expected: Expected) -> ParseError {
        ParseError::GrammarViolation {
            expected,
            found: self.stream.current().cloned(),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.stream.is_exhausted() {
            Ok(())
        } else {
            Err(self.violation(Expected::EndOfInput))
        }
    }

    /// Run a recursive production one nesting level deeper, failing before
    /// the configured limit is exceeded
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(self.violation(Expected::ShallowerNesting {
                limit: self.config.max_depth,
            }));
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Take the current token if `accept` holds for it; never advances otherwise
    pub(crate) fn take_if(&mut self, accept: impl Fn(&Token) -> bool) -> Option<Token> {
        if !self.stream.current().is_some_and(|t| accept(t)) {
            return None;
        }
        let token = self.stream.next_token()?;
        tracing::trace!(token = %token, "consumed");
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::NodeKind;

    #[test]
    fn test_matches_is_exact() {
        let parser = Parser::new(vec![Token::keyword("class")]);
        assert!(parser.matches(TokenKind::Keyword, "class"));
        assert!(!parser.matches(TokenKind::Keyword, "Class"));
        assert!(!parser.matches(TokenKind::Identifier, "class"));
    }

    #[test]
    fn test_matches_on_exhausted_stream() {
        let parser = Parser::new(Vec::new());
        assert!(!parser.matches(TokenKind::Symbol, "}"));
        assert!(!parser.matches_kind(TokenKind::Identifier));
    }

    #[test]
    fn test_expect_consumes_on_match() {
        let mut parser = Parser::new(vec![Token::symbol("{"), Token::symbol("}")]);
        let token = parser.expect(TokenKind::Symbol, "{").unwrap();
        assert_eq!(token, Token::symbol("{"));
        assert!(parser.matches_symbol("}"));
    }

    #[test]
    fn test_expect_failure_does_not_advance() {
        let mut parser = Parser::new(vec![Token::keyword("int")]);
        let err = parser.expect(TokenKind::Symbol, "}").unwrap_err();

        assert_eq!(
            err,
            ParseError::GrammarViolation {
                expected: Expected::Token {
                    kind: TokenKind::Symbol,
                    text: "}".to_string()
                },
                found: Some(Token::keyword("int")),
            }
        );
        assert_eq!(parser.remaining().len(), 1);
    }

    #[test]
    fn test_expect_at_end_of_input() {
        let mut parser = Parser::new(Vec::new());
        let err = parser.expect_kind(TokenKind::Identifier).unwrap_err();
        assert_eq!(err.found(), None);
        assert_eq!(err.to_string(), "expected identifier, found end of input");
    }

    #[test]
    fn test_error_message_with_location() {
        let mut parser = Parser::from_source("class Main {\n  int").unwrap();
        let err = parser.parse_class().unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected symbol '}', found keyword 'int' at line 2, column 3"
        );
        assert_eq!(err.location(), Some(SourceLocation::new(2, 3)));
    }

    #[test]
    fn test_expect_one_of() {
        let mut parser = Parser::new(vec![Token::keyword("field"), Token::symbol(";")]);
        assert!(parser
            .expect_one_of(TokenKind::Keyword, &["static", "field"])
            .is_ok());
        let err = parser
            .expect_one_of(TokenKind::Keyword, &["static", "field"])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected keyword 'static' or 'field', found symbol ';'"
        );
    }

    #[test]
    fn test_parse_simple_class() {
        let source = "class Main { function void main() { return; } }";
        let mut parser = Parser::from_source(source).unwrap();
        let tree = parser.parse_class().unwrap();

        assert_eq!(tree.label, NodeKind::Class);
        assert_eq!(tree.children_labeled(NodeKind::Subroutine).count(), 1);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_parse_class_rejects_trailing_tokens() {
        let mut parser = Parser::from_source("class Main { } class").unwrap();
        let err = parser.parse_class().unwrap_err();
        assert_eq!(err.expected(), &Expected::EndOfInput);
    }

    #[test]
    fn test_nested_limit_and_unwind() {
        let config = ParserConfig::default().with_max_depth(2);
        let mut parser = Parser::with_config(vec![Token::symbol("(")], config);

        let inner = parser.nested(|p| p.nested(|p| p.nested(|_| Ok(()))));
        let err = inner.unwrap_err();
        assert_eq!(err.expected(), &Expected::ShallowerNesting { limit: 2 });
        assert_eq!(
            err.to_string(),
            "expected nesting at most 2 levels deep, found symbol '('"
        );

        // The counter unwinds after a failure
        assert!(parser.nested(|p| p.nested(|_| Ok(()))).is_ok());
        assert_eq!(parser.depth, 0);
    }
}
