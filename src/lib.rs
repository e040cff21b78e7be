mod block;
mod config;
mod docx;
mod error;
mod inline;
mod model;
mod parser;
pub mod preview;
mod render;
mod table;

pub use block::Block;
pub use config::{Config, HeadingConfig, PageConfig, RuleConfig, TableConfig, TextConfig};
pub use docx::MIME_TYPE;
pub use error::{Error, Result};
pub use inline::{StyledFragment, scan};
pub use model::{
    Document, DocumentElement, PageSetup, Paragraph, Run, Spacing, Table, TableCell, TableRow,
};
pub use render::{RenderContext, Rendered, render};
pub use table::{TableModel, parse as parse_table};

/// Filename suggested for downloaded documents.
pub const DEFAULT_FILE_NAME: &str = "converted-document.docx";

/// A finished document ready to hand to a client.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub content_type: &'static str,
}

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to document elements with custom config.
pub fn markdown_to_elements(markdown: &str, config: &Config) -> Vec<DocumentElement> {
    let blocks = parse(markdown);
    render::render(&blocks, config)
}

/// Build the single-section document for `markdown`.
pub fn markdown_to_document(markdown: &str, config: &Config) -> Result<Document> {
    if markdown.trim().is_empty() {
        return Err(Error::InvalidInput);
    }

    Ok(Document {
        page: PageSetup {
            width: config.page.width,
            height: config.page.height,
            margin: config.page.margin,
        },
        body: markdown_to_elements(markdown, config),
    })
}

/// Convert markdown to .docx bytes using default config.
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_docx_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to .docx bytes with custom config.
pub fn markdown_to_docx_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    let document = markdown_to_document(markdown, config)?;
    docx::assemble(&document)
}

/// Convert markdown into a downloadable attachment.
///
/// Conversion failures are logged with their cause; the returned error only
/// carries a generic message.
pub fn convert(markdown: &str, config: &Config) -> Result<Attachment> {
    let bytes = markdown_to_docx_with_config(markdown, config).inspect_err(|err| {
        if let Error::Conversion(cause) = err {
            log::error!("Conversion error: {}", cause);
        }
    })?;

    Ok(Attachment {
        bytes,
        file_name: DEFAULT_FILE_NAME,
        content_type: MIME_TYPE,
    })
}

/// Best-effort HTML preview of markdown.
pub fn markdown_to_preview_html(markdown: &str) -> String {
    preview::to_html(markdown)
}
