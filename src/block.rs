use crate::table::TableModel;

/// Block-level units tokenized from Markdown.
///
/// Text fields hold raw Markdown source, so inline markers are still present
/// and are interpreted later by the inline scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        depth: u8,
        text: String,
    },
    /// One paragraph. Line breaks from the source are kept as `\n`.
    Paragraph {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    Table(TableModel),
    Rule,
    /// Extra vertical space between two blocks.
    Blank,
    /// A block kind the renderer does not handle (code, quote, html, ...).
    Unsupported {
        kind: &'static str,
    },
}
