//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. Whitespace and all three comment forms (`//`, `/* */`, `/** */`)
//! are skipped. The parser never relies on this module: any producer of
//! correctly classified tokens can feed it.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Largest value an integer constant may hold
pub const MAX_INTEGER_CONSTANT: u32 = 32767;

/// The five lexical classes of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexical unit.
///
/// `location` is filled in by [`Lexer`] and only used for diagnostics; two
/// tokens compare equal on kind and text alone.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: Option<SourceLocation>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            location: None,
        }
    }

    pub fn at(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            text: text.into(),
            location: Some(location),
        }
    }

    pub fn keyword(text: &str) -> Self {
        Token::new(TokenKind::Keyword, text)
    }

    pub fn symbol(text: &str) -> Self {
        Token::new(TokenKind::Symbol, text)
    }

    pub fn identifier(text: &str) -> Self {
        Token::new(TokenKind::Identifier, text)
    }

    pub fn integer(text: &str) -> Self {
        Token::new(TokenKind::IntegerConstant, text)
    }

    pub fn string(text: &str) -> Self {
        Token::new(TokenKind::StringConstant, text)
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringConstant => write!(f, "{} \"{}\"", self.kind, self.text),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Returns true if `word` is one of the 21 reserved words.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "class"
            | "constructor"
            | "function"
            | "method"
            | "field"
            | "static"
            | "var"
            | "int"
            | "char"
            | "boolean"
            | "void"
            | "true"
            | "false"
            | "null"
            | "this"
            | "let"
            | "do"
            | "if"
            | "else"
            | "while"
            | "return"
    )
}

/// Returns true if `ch` is one of the 19 single-character symbols.
pub fn is_symbol(ch: char) -> bool {
    matches!(
        ch,
        '{' | '}' | '(' | ')' | '[' | ']' | '.' | ',' | ';' | '+' | '-' | '*' | '/' | '&' | '|'
            | '<' | '>' | '=' | '~'
    )
}

/// Lexer for Jack source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                break;
            }

            tokens.push(self.next_token()?);
        }

        tracing::debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '"' => self.string_constant(loc),
            '0'..='9' => self.integer_constant(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),
            c if is_symbol(c) => Ok(Token::at(TokenKind::Symbol, c.to_string(), loc)),
            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// String constant: everything up to the closing quote, on one line
    fn string_constant(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(Token::at(TokenKind::StringConstant, string, loc));
                }
                '\n' => break,
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated string constant".to_string(),
            location: loc,
        })
    }

    fn integer_constant(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match num_str.parse::<u32>() {
            Ok(value) if value <= MAX_INTEGER_CONSTANT => {
                Ok(Token::at(TokenKind::IntegerConstant, num_str, loc))
            }
            _ => Err(LexError {
                message: format!(
                    "Integer constant {} out of range 0..={}",
                    num_str, MAX_INTEGER_CONSTANT
                ),
                location: loc,
            }),
        }
    }

    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_keyword(&ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::at(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        // Covers /** doc comments */ as well
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("class Main { }").tokenize().unwrap();

        assert_eq!(
            kinds_and_texts(&tokens),
            vec![
                (TokenKind::Keyword, "class"),
                (TokenKind::Identifier, "Main"),
                (TokenKind::Symbol, "{"),
                (TokenKind::Symbol, "}"),
            ]
        );
    }

    #[test]
    fn test_symbols_split_without_whitespace() {
        let tokens = Lexer::new("a[i]=-x+~y;").tokenize().unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "[", "i", "]", "=", "-", "x", "+", "~", "y", ";"]);
    }

    #[test]
    fn test_comments() {
        let source = "/** doc */ var int x; // trailing\n/* block\ncomment */ let";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["var", "int", "x", ";", "let"]);
    }

    #[test]
    fn test_division_is_not_a_comment() {
        let tokens = Lexer::new("x / 2").tokenize().unwrap();
        assert_eq!(tokens[1], Token::symbol("/"));
    }

    #[test]
    fn test_string_constant() {
        let tokens = Lexer::new(r#"do Output.printString("hi there");"#)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[5], Token::string("hi there"));
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("class\n  Main").tokenize().unwrap();
        assert_eq!(tokens[0].location, Some(SourceLocation::new(1, 1)));
        assert_eq!(tokens[1].location, Some(SourceLocation::new(2, 3)));
    }

    #[test]
    fn test_integer_range() {
        assert!(Lexer::new("32767").tokenize().is_ok());
        let err = Lexer::new("32768").tokenize().unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"abc\nlet").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(Lexer::new("/* never closed").tokenize().is_err());
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("let x = 1 # 2;").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 11));
    }
}
