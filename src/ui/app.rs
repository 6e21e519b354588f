//! Main TUI application state and logic

use crate::parser::ast::{ParseTree, SourceLocation};
use crate::parser::parse::ParseError;
use crate::ui::panes::{
    flatten_visible, SourceScrollState, StatusRenderData, TreeRow, TreeScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code that was parsed
    pub source_code: String,

    /// The parse tree, absent when parsing failed
    tree: Option<ParseTree>,

    /// Parse failure message and where it happened
    error: Option<(String, Option<SourceLocation>)>,

    /// Ids of collapsed nodes
    collapsed: FxHashSet<usize>,

    /// Currently visible outline rows
    rows: Vec<TreeRow>,

    /// Index into `rows`
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    tree_scroll: TreeScrollState,
    source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for a parse result and the source it came from
    pub fn new(source_code: String, outcome: Result<ParseTree, ParseError>) -> Self {
        let (tree, error, status_message) = match outcome {
            Ok(tree) => (Some(tree), None, String::from("Ready!")),
            Err(err) => {
                let location = err.location();
                (None, Some((err.to_string(), location)), err.to_string())
            }
        };

        let mut app = App {
            source_code,
            tree,
            error,
            collapsed: FxHashSet::default(),
            rows: Vec::new(),
            selected: 0,
            focused_pane: FocusedPane::Tree,
            tree_scroll: TreeScrollState::default(),
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message,
        };
        app.refresh_rows();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The rows currently shown in the tree pane
    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    fn refresh_rows(&mut self) {
        self.rows = match &self.tree {
            Some(tree) => flatten_visible(tree, &self.collapsed),
            None => Vec::new(),
        };
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// Source line to mark: the selected node's first token, or the error
    fn marked_line(&self) -> usize {
        match &self.error {
            Some((_, location)) => location.map_or(0, |loc| loc.line),
            None => self
                .rows
                .get(self.selected)
                .and_then(|row| row.line)
                .unwrap_or(0),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Tree (left) | Source (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let marked_line = self.marked_line();

        super::panes::render_tree_pane(
            frame,
            columns[0],
            &self.rows,
            self.selected,
            self.error.as_ref().map(|(message, _)| message.as_str()),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_source_pane(
            frame,
            columns[1],
            &self.source_code,
            marked_line,
            self.error.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let (node_count, leaf_count) = match &self.tree {
            Some(tree) => (tree.node_count(), tree.leaves().len()),
            None => (0, 0),
        };

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                node_count,
                leaf_count,
                selected: self.selected,
                visible_rows: self.rows.len(),
                is_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Tree => self.selected = 0,
                FocusedPane::Source => self.source_scroll.offset = 0,
            },
            KeyCode::End => match self.focused_pane {
                FocusedPane::Tree => self.selected = self.rows.len().saturating_sub(1),
                FocusedPane::Source => self.source_scroll.offset = usize::MAX,
            },
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.focused_pane == FocusedPane::Tree {
                    self.toggle_selected();
                }
            }
            _ => {}
        }
    }

    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Tree => {
                let last = self.rows.len().saturating_sub(1);
                self.selected = self.selected.saturating_add_signed(delta).min(last);
            }
            FocusedPane::Source => {
                // Clamped against the line count when rendered
                self.source_scroll.offset = self.source_scroll.offset.saturating_add_signed(delta);
            }
        }
    }

    fn toggle_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if !row.is_expandable() {
            self.status_message = format!("{} '{}' has no children", row.label, row.value);
            return;
        }

        let (id, label) = (row.id, row.label);
        if self.collapsed.remove(&id) {
            self.status_message = format!("Expanded {}", label);
        } else {
            self.collapsed.insert(id);
            self.status_message = format!("Collapsed {}", label);
        }
        self.refresh_rows();
    }
}
