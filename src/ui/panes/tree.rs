//! Parse tree pane with collapsible nodes
//!
//! The tree is shown as an indented outline. Every node gets a stable id,
//! its pre-order index in the full tree, so collapsing a subtree never
//! renumbers the nodes around it.

use crate::parser::ast::{NodeKind, ParseTree};
use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use rustc_hash::FxHashSet;

/// One visible line of the outline
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: usize,
    pub depth: usize,
    pub label: NodeKind,
    pub value: String,
    pub child_count: usize,
    pub collapsed: bool,
    /// 1-based source line of the first token under the node
    pub line: Option<usize>,
}

impl TreeRow {
    pub fn is_expandable(&self) -> bool {
        self.child_count > 0
    }
}

/// Flatten the tree into the rows currently visible given the collapsed ids
pub fn flatten_visible(tree: &ParseTree, collapsed: &FxHashSet<usize>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut next_id = 0;
    push_rows(tree, 0, collapsed, &mut next_id, &mut rows);
    rows
}

fn push_rows(
    node: &ParseTree,
    depth: usize,
    collapsed: &FxHashSet<usize>,
    next_id: &mut usize,
    rows: &mut Vec<TreeRow>,
) {
    let id = *next_id;
    let is_collapsed = collapsed.contains(&id) && !node.children.is_empty();

    rows.push(TreeRow {
        id,
        depth,
        label: node.label,
        value: node.value.clone(),
        child_count: node.children.len(),
        collapsed: is_collapsed,
        line: node.first_location().map(|loc| loc.line),
    });

    if is_collapsed {
        // Skip the hidden subtree's ids
        *next_id += node.node_count();
        return;
    }

    *next_id += 1;
    for child in &node.children {
        push_rows(child, depth + 1, collapsed, next_id, rows);
    }
}

/// Scroll state for the tree pane
#[derive(Debug, Default)]
pub struct TreeScrollState {
    pub offset: usize,
}

fn row_line(row: &TreeRow, is_selected: bool) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let marker = if !row.is_expandable() {
        "  "
    } else if row.collapsed {
        "▸ "
    } else {
        "▾ "
    };

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
    ];

    match row.label {
        NodeKind::Token(kind) => {
            let value_color = match kind {
                TokenKind::Keyword => DEFAULT_THEME.keyword,
                TokenKind::Symbol => DEFAULT_THEME.fg,
                TokenKind::Identifier => DEFAULT_THEME.class_name,
                TokenKind::IntegerConstant => DEFAULT_THEME.number,
                TokenKind::StringConstant => DEFAULT_THEME.string,
            };
            spans.push(Span::styled(
                format!("{} ", kind),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            let shown = if kind == TokenKind::StringConstant {
                format!("\"{}\"", row.value)
            } else {
                row.value.clone()
            };
            spans.push(Span::styled(shown, Style::default().fg(value_color)));
        }
        label => {
            spans.push(Span::styled(
                label.as_str(),
                Style::default()
                    .fg(DEFAULT_THEME.production)
                    .add_modifier(Modifier::BOLD),
            ));
            if row.collapsed {
                spans.push(Span::styled(
                    format!(" … {} children", row.child_count),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
        }
    }

    let line = Line::from(spans);
    if is_selected {
        line.style(Style::default().bg(DEFAULT_THEME.selection_bg))
    } else {
        line
    }
}

/// Render the tree pane, or the parse error when there is no tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    error: Option<&str>,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Parse Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(message) = error {
        let items = vec![
            ListItem::new(Line::from(Span::styled(
                "No tree: the source failed to parse",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ))),
            ListItem::new(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            ))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if selected < scroll_state.offset {
        scroll_state.offset = selected;
    } else if selected >= scroll_state.offset + visible_height {
        scroll_state.offset = selected + 1 - visible_height;
    }
    scroll_state.offset = scroll_state
        .offset
        .min(rows.len().saturating_sub(visible_height));

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, row)| ListItem::new(row_line(row, idx == selected)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
