//! Forward-only cursor over an owned token sequence
//!
//! The cursor is an index into the vector: advancing increments it, and the
//! stream is exhausted once it equals the length. Nothing moves it backward,
//! so a token the parser has consumed is never looked at again.

use super::lexer::Token;

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            position: 0,
        }
    }

    /// The token under the cursor, or `None` once the stream is exhausted
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// The token `n` places past the cursor (`peek(0)` is `current()`)
    pub fn peek(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Move one token forward. A no-op once exhausted.
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.position += 1;
        }
    }

    /// Take the current token and move past it
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.current().cloned()?;
        self.advance();
        Some(token)
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream_starts_exhausted() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_exhausted());
        assert!(stream.current().is_none());
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_advance_walks_forward() {
        let mut stream = TokenStream::new(vec![Token::keyword("class"), Token::symbol("{")]);
        assert_eq!(stream.current(), Some(&Token::keyword("class")));
        assert_eq!(stream.peek(1), Some(&Token::symbol("{")));

        stream.advance();
        assert_eq!(stream.current(), Some(&Token::symbol("{")));
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.remaining().len(), 1);
    }

    #[test]
    fn test_advance_past_end_is_idempotent() {
        let mut stream = TokenStream::new(vec![Token::symbol(";")]);
        stream.advance();
        stream.advance();
        stream.advance();
        assert!(stream.is_exhausted());
        assert_eq!(stream.position(), 1);
        assert!(stream.remaining().is_empty());
        assert!(stream.next_token().is_none());
    }

    #[test]
    fn test_next_token_consumes() {
        let mut stream = TokenStream::new(vec![Token::identifier("x"), Token::symbol("=")]);
        assert_eq!(stream.next_token(), Some(Token::identifier("x")));
        assert_eq!(stream.current(), Some(&Token::symbol("=")));
    }
}
