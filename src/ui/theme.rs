use ratatui::style::Color;

/// Colors shared by the explorer panes
pub struct Theme {
    pub fg: Color,
    pub comment: Color,
    pub error: Color,

    // Token classes
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub bracket: Color,
    pub call: Color,
    pub class_name: Color, // Primitive types and identifiers in the tree

    // Tree
    pub production: Color,

    // Chrome
    pub marker: Color, // Line number of the selected node
    pub border_focused: Color,
    pub border_normal: Color,
    pub selection_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    comment: Color::Rgb(108, 112, 134),
    error: Color::Rgb(243, 139, 168),

    keyword: Color::Rgb(137, 180, 250),    // Blue
    string: Color::Rgb(166, 227, 161),     // Green
    number: Color::Rgb(250, 179, 135),     // Orange
    bracket: Color::Rgb(137, 180, 250),    // Blue
    call: Color::Rgb(249, 226, 175),       // Yellow
    class_name: Color::Rgb(148, 226, 213), // Teal

    production: Color::Rgb(245, 194, 231), // Pink

    marker: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    selection_bg: Color::Rgb(50, 50, 70),
};
