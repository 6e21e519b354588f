//! # Introduction
//!
//! jackdaw is a syntax analyzer for Jack, the small object-based teaching
//! language. It turns a class declaration into a concrete parse tree whose
//! leaves are exactly the consumed tokens, in input order, and reports the
//! first grammar violation precisely.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → ParseTree → Formats / TUI
//! ```
//!
//! 1. [`parser`]: tokenizes source text and builds the [`ParseTree`]. The
//!    parser also accepts any pre-classified token vector directly.
//! 2. [`formats`]: nested tagged text and JSON renderings of trees and tokens.
//! 3. [`ui`]: ratatui-based tree explorer; not part of the stable library API.
//! 4. [`error`]: the crate-level error type joining every stage.
//!
//! ## Example
//!
//! ```
//! use jackdaw::{analyze, ParserConfig};
//!
//! let (tokens, tree) = analyze("class Main { }", &ParserConfig::default()).unwrap();
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tree.label.as_str(), "class");
//! ```

pub mod error;
pub mod formats;
pub mod parser;
pub mod ui;

pub use error::{JackError, JackResult};
pub use parser::{ParseTree, Parser, ParserConfig, Token, TokenKind, TypeNamePolicy};

/// Tokenize `source` and parse it as one class.
///
/// Returns the token sequence alongside the tree so callers can emit either.
pub fn analyze(source: &str, config: &ParserConfig) -> JackResult<(Vec<Token>, ParseTree)> {
    let tokens = parser::Lexer::new(source).tokenize()?;
    let tree = Parser::with_config(tokens.clone(), config.clone()).parse_class()?;
    Ok((tokens, tree))
}
