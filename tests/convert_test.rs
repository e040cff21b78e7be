//! End-to-end tests for Markdown to .docx conversion.

use std::io::{Cursor, Read};

use mddocx::{Config, Error, markdown_to_docx, markdown_to_docx_with_config};
use zip::ZipArchive;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut file = archive.by_name(name).expect("part present");
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_package_contains_required_parts() {
    let bytes = markdown_to_docx("# Hello\n\nWorld").unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "docProps/core.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }
}

#[test]
fn test_document_body() {
    let markdown = "# First\n\nIntro with **bold** and `code`.\n\n- one\n- two\n\n---\n\n# Second\n\n| A | B |\n|---|---|\n| 1 | 2 |";
    let bytes = markdown_to_docx(markdown).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    assert!(xml.contains(">First</w:t>"));
    assert!(xml.contains(r#"<w:sz w:val="40"/>"#));
    assert_eq!(xml.matches("<w:pageBreakBefore/>").count(), 1);
    assert_eq!(xml.matches("<w:keepNext/>").count(), 2);
    assert!(xml.contains(r#"<w:rFonts w:ascii="Courier New""#));
    assert_eq!(xml.matches(">• </w:t>").count(), 2);
    assert!(xml.contains(&"⎯".repeat(50)));
    assert!(xml.contains(r#"w:fill="E7E6E6""#));
    assert!(xml.contains(r#"<w:gridCol w:w="4500"/>"#));
}

#[test]
fn test_page_break_before_second_title_only() {
    let bytes = markdown_to_docx("# A\n\ntext\n\n# B\n\n## C\n\n# D").unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert_eq!(xml.matches("<w:pageBreakBefore/>").count(), 2);

    let first_title = xml.find(">A</w:t>").unwrap();
    let first_break = xml.find("<w:pageBreakBefore/>").unwrap();
    assert!(first_break > first_title);
}

#[test]
fn test_text_is_escaped() {
    let bytes = markdown_to_docx("Fish & chips <tasty>").unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains("Fish &amp; chips"));
    assert!(!xml.contains("<tasty>"));
}

#[test]
fn test_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.toml");
    std::fs::write(&path, "[text]\ncode_font = \"Consolas\"\n\n[table]\nwidth = 6000\n").unwrap();

    let config = Config::load(&path).unwrap();
    let bytes =
        markdown_to_docx_with_config("`x`\n\n| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |", &config)
            .unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"w:ascii="Consolas""#));
    assert!(xml.contains(r#"<w:gridCol w:w="2000"/>"#));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[table\nwidth = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_empty_input() {
    let err = markdown_to_docx("").unwrap_err();
    assert_eq!(err.to_string(), "No text provided");
}

#[test]
fn test_unbalanced_markers_do_not_fail() {
    let bytes = markdown_to_docx("**open bold\n\n*open italic and `code").unwrap();
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains("<w:b/>"));
    assert!(xml.contains("<w:i/>"));
}

#[test]
fn test_leading_rule_keeps_following_content() {
    let bytes = markdown_to_docx("---\n\n# Intro\n\ntext\n\n---\n\nmore").unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    assert!(xml.contains(">Intro</w:t>"));
    assert!(xml.contains(">text</w:t>"));
    assert!(xml.contains(">more</w:t>"));
}
