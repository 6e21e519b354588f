//! Output formats for parse trees and token sequences
//!
//! - [`tag`]: nested tagged text, one element per node
//! - [`json`]: the serde representation of the tree
//!
//! Both are pure functions of the tree; nothing here touches the parser.

pub mod json;
pub mod tag;

pub use json::to_json;
pub use tag::{serialize_tokens, serialize_tree};
