use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentElement, Paragraph, Run, Table, TableCell, TableRow};

pub const MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Serialize a document into a .docx package.
pub fn assemble(document: &Document) -> Result<Vec<u8>> {
    let document_xml = document_to_xml(document);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", rels_xml()),
        ("docProps/core.xml", core_xml()),
        ("word/_rels/document.xml.rels", word_rels_xml()),
        ("word/styles.xml", styles_xml()),
        ("word/document.xml", document_xml.as_str()),
    ];

    for (name, content) in parts {
        zip.start_file(name, opt)?;
        zip.write_all(content.as_bytes()).map_err(Error::conversion)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Build `word/document.xml` for the document body.
pub fn document_to_xml(document: &Document) -> String {
    let mut out = String::new();
    out.push_str(XML_HEADER);
    out.push_str(
        r#"<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    let mut page_break_pending = false;
    for element in &document.body {
        match element {
            DocumentElement::PageBreak => {
                if page_break_pending {
                    emit_page_break(&mut out);
                }
                page_break_pending = true;
            }
            DocumentElement::Paragraph(paragraph) => {
                emit_paragraph(paragraph, page_break_pending, &mut out);
                page_break_pending = false;
            }
            DocumentElement::Table(table) => {
                if page_break_pending {
                    emit_page_break(&mut out);
                    page_break_pending = false;
                }
                emit_table(table, &mut out);
            }
        }
    }
    if page_break_pending {
        emit_page_break(&mut out);
    }

    // Word expects the body to end with a paragraph
    if matches!(document.body.last(), Some(DocumentElement::Table(_))) {
        out.push_str("<w:p/>");
    }

    let page = &document.page;
    out.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
        page.width,
        page.height,
        m = page.margin
    ));
    out.push_str("</w:body></w:document>");
    out
}

fn emit_page_break(out: &mut String) {
    out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
}

fn emit_paragraph(paragraph: &Paragraph, page_break_before: bool, out: &mut String) {
    out.push_str("<w:p><w:pPr>");
    if paragraph.keep_next {
        out.push_str("<w:keepNext/>");
    }
    if page_break_before {
        out.push_str("<w:pageBreakBefore/>");
    }

    let spacing = &paragraph.spacing;
    out.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}""#,
        spacing.before, spacing.after
    ));
    if let Some(line) = spacing.line {
        out.push_str(&format!(r#" w:line="{}" w:lineRule="auto""#, line));
    }
    out.push_str("/>");

    if let Some(indent) = paragraph.indent_left {
        out.push_str(&format!(r#"<w:ind w:left="{}"/>"#, indent));
    }
    out.push_str("</w:pPr>");

    for run in &paragraph.runs {
        emit_run(run, out);
    }
    out.push_str("</w:p>");
}

fn emit_run(run: &Run, out: &mut String) {
    out.push_str("<w:r>");

    let has_props = run.bold || run.italic || run.font.is_some() || run.size.is_some();
    if has_props {
        out.push_str("<w:rPr>");
        if let Some(font) = &run.font {
            let font = escape(font);
            out.push_str(&format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            ));
        }
        if run.bold {
            out.push_str("<w:b/><w:bCs/>");
        }
        if run.italic {
            out.push_str("<w:i/><w:iCs/>");
        }
        if let Some(size) = run.size {
            out.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
        }
        out.push_str("</w:rPr>");
    }

    // Line breaks inside a run are hard breaks
    for (index, line) in run.text.split('\n').enumerate() {
        if index > 0 {
            out.push_str("<w:br/>");
        }
        out.push_str(r#"<w:t xml:space="preserve">"#);
        out.push_str(&escape(line));
        out.push_str("</w:t>");
    }

    out.push_str("</w:r>");
}

fn emit_table(table: &Table, out: &mut String) {
    let border = border_xml(table.border_size);

    out.push_str("<w:tbl><w:tblPr>");
    out.push_str(&format!(r#"<w:tblW w:w="{}" w:type="dxa"/>"#, table.width));
    out.push_str("<w:tblBorders>");
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        out.push_str(&format!("<w:{side} {border}/>"));
    }
    out.push_str("</w:tblBorders>");
    out.push_str(r#"<w:tblLayout w:type="fixed"/></w:tblPr>"#);

    out.push_str("<w:tblGrid>");
    for width in &table.column_widths {
        out.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, width));
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        emit_row(row, &border, out);
    }
    out.push_str("</w:tbl>");
}

fn emit_row(row: &TableRow, border: &str, out: &mut String) {
    out.push_str("<w:tr>");
    if row.is_header {
        out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
    }
    for cell in &row.cells {
        emit_cell(cell, border, out);
    }
    out.push_str("</w:tr>");
}

fn emit_cell(cell: &TableCell, border: &str, out: &mut String) {
    out.push_str("<w:tc><w:tcPr>");
    out.push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, cell.width));
    out.push_str("<w:tcBorders>");
    for side in ["top", "left", "bottom", "right"] {
        out.push_str(&format!("<w:{side} {border}/>"));
    }
    out.push_str("</w:tcBorders>");
    if let Some(fill) = &cell.shading {
        out.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            escape(fill)
        ));
    }
    out.push_str(r#"<w:vAlign w:val="center"/></w:tcPr>"#);
    emit_paragraph(&cell.paragraph, false, out);
    out.push_str("</w:tc>");
}

fn border_xml(size: u32) -> String {
    format!(r#"w:val="single" w:sz="{size}" w:space="0" w:color="auto""#)
}

/// Escape text for XML content and attributes, dropping characters XML 1.0
/// does not allow.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#
}

fn word_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
}

fn core_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:creator>mddocx</dc:creator>
</cp:coreProperties>"#
}

fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#
}
