//! JSON serialization of parse trees
//!
//! Each node becomes `{ "label": ..., "value": ..., "children": [...] }`.
//! Source locations are not part of the output.

use crate::parser::ast::ParseTree;

/// Pretty-printed JSON for a tree
pub fn to_json(tree: &ParseTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}
