//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: Collapsible outline of the parse tree
//! - [`source`]: Source code display with syntax highlighting and the selected node's line
//! - [`status`]: Status bar with keybindings and tree statistics
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state it keeps between frames.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{flatten_visible, render_tree_pane, TreeRow, TreeScrollState};
