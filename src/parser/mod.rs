//! Jack syntax analyzer
//!
//! This module turns Jack source text, or any pre-classified token sequence,
//! into a parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`stream`]: Forward-only cursor over the tokens
//! - [`parse`]: The [`Parser`](parse::Parser), match primitives and errors
//! - [`declarations`], [`statements`], [`expressions`]: one method per production
//! - [`ast`]: Parse tree definitions
//! - [`config`]: Parser options
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with no backtracking. Every leaf of the
//! resulting tree is exactly one consumed token, in input order. The first
//! grammar violation aborts the parse; there is no error recovery.

pub mod ast;
pub mod config;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
pub mod stream;

pub use ast::{NodeKind, ParseTree, SourceLocation};
pub use config::{ParserConfig, TypeNamePolicy};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parse::{Expected, ParseError, Parser};
