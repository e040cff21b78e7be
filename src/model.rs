//! Render-ready document primitives.
//!
//! Units follow WordprocessingML: lengths in twips, run sizes in half-points,
//! border widths in eighths of a point.

/// A styled text run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font family override, used for inline code.
    pub font: Option<String>,
    /// Size in half-points. `None` keeps the document default.
    pub size: Option<u32>,
}

impl Run {
    pub fn plain(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            size: Some(size),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    /// Line spacing in 240ths of a line.
    pub line: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub spacing: Spacing,
    pub indent_left: Option<u32>,
    /// Keep this paragraph on the same page as the next one.
    pub keep_next: bool,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub paragraph: Paragraph,
    pub width: u32,
    /// Hex fill color, e.g. `E7E6E6`.
    pub shading: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Repeat this row at the top of each page.
    pub is_header: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: u32,
    pub column_widths: Vec<u32>,
    pub border_size: u32,
    pub rows: Vec<TableRow>,
}

/// One unit of the document body, in output order.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentElement {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

/// A single-section document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    pub body: Vec<DocumentElement>,
}
