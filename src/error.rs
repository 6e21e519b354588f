use thiserror::Error;

use crate::parser::{LexError, ParseError};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a jackdaw operation.
pub type JackResult<T> = Result<T, JackError>;

/// Any failure between reading a source file and emitting its tree.
#[derive(Debug, Error)]
pub enum JackError {
    /// Reading the source or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The tokens do not form a valid class.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The tree could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Expected, Token};

    #[test]
    fn test_parse_error_message() {
        let err: JackError = ParseError::GrammarViolation {
            expected: Expected::Term,
            found: Some(Token::symbol(")")),
        }
        .into();
        assert_eq!(err.to_string(), "parse error: expected a term, found symbol ')'");
    }
}
