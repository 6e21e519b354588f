//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the Jack class
//! being explored with basic syntax highlighting and a marker on the line
//! of the selected tree node.
//!
//! # Features
//!
//! - Syntax highlighting for Jack keywords, types, strings, numbers, and comments
//! - Selected line highlighting, or an error highlight when parsing failed
//! - Scroll state that keeps the marked line in view
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character scanner to apply syntax
//! highlighting styles without rerunning the lexer on every frame.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one line of Jack code.
///
/// `in_block_comment` carries an unterminated `/* ... */` over to the next
/// line.
fn highlight_source_code(line: &str, in_block_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    let comment_style = Style::default().fg(DEFAULT_THEME.comment);

    while i < chars.len() {
        let c = chars[i];

        // Inside a block comment opened on an earlier line, or just opened here
        let block_from = if *in_block_comment {
            Some(i)
        } else if c == '/' && chars.get(i + 1) == Some(&'*') {
            flush_word(&mut spans, &mut current_word, false);
            Some(i + 2)
        } else {
            None
        };
        if let Some(from) = block_from {
            match find_comment_end(&chars, from) {
                Some(end) => {
                    spans.push(Span::styled(chars[i..end].iter().collect::<String>(), comment_style));
                    *in_block_comment = false;
                    i = end;
                    continue;
                }
                None => {
                    spans.push(Span::styled(chars[i..].iter().collect::<String>(), comment_style));
                    *in_block_comment = true;
                    return Line::from(spans);
                }
            }
        }

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(chars[i..].iter().collect::<String>(), comment_style));
            break;
        }

        if c == '"' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += 1;
            }
            if end < chars.len() {
                end += 1;
            }
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters
        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.bracket),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

/// Index just past the first `*/` at or after `from`
fn find_comment_end(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == '*' && chars[j + 1] == '/')
        .map(|j| j + 2)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_function: bool) {
    if !word.is_empty() {
        let style = get_keyword_style(word, is_function);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "char" | "boolean" | "void" => Style::default().fg(DEFAULT_THEME.class_name),
        "class" | "constructor" | "function" | "method" | "field" | "static" | "var" | "let"
        | "do" | "if" | "else" | "while" | "return" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" | "null" | "this" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ if is_function => Style::default().fg(DEFAULT_THEME.call),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
}

/// Render the source code pane.
///
/// `marked_line` is 1-based; 0 means nothing is marked. While the pane is
/// focused its scroll offset is left to the user.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    marked_line: usize,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Follow the marked line unless the user is scrolling this pane
    if !is_focused && marked_line > 0 && marked_line <= total_lines {
        let idx = marked_line - 1;
        if idx < scroll_state.offset {
            scroll_state.offset = idx;
        } else if idx >= scroll_state.offset + visible_height {
            scroll_state.offset = idx + 1 - visible_height;
        }
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    // Block comments can span lines, so highlighting starts at the top
    let mut in_block_comment = false;
    let visible_lines: Vec<Line> = lines
        .iter()
        .take(scroll_state.offset + visible_height)
        .map(|line| highlight_source_code(line, &mut in_block_comment))
        .enumerate()
        .skip(scroll_state.offset)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_marked = line_num == marked_line;
            let line_num_str = format!("{:4} ", line_num);

            let num_style = if is_marked && is_error {
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_marked {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(Style::default().bg(DEFAULT_THEME.selection_bg));
                }
                Style::default()
                    .fg(DEFAULT_THEME.marker)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
