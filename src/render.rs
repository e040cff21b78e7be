use crate::block::Block;
use crate::config::Config;
use crate::inline::{self, StyledFragment};
use crate::model::{DocumentElement, Paragraph, Run, Spacing, Table, TableCell, TableRow};
use crate::table::{self, TableModel};

/// Outcome of rendering a single block.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Elements(Vec<DocumentElement>),
    /// The block produces nothing in the output.
    Skip,
}

/// State carried across the blocks of one conversion.
pub struct RenderContext<'a> {
    config: &'a Config,
    top_level_heading_seen: bool,
}

/// Convert blocks to document elements, in order.
pub fn render(blocks: &[Block], config: &Config) -> Vec<DocumentElement> {
    let mut context = RenderContext::new(config);
    let mut elements = Vec::new();

    for block in blocks {
        if let Rendered::Elements(rendered) = context.render_block(block) {
            elements.extend(rendered);
        }
    }

    elements
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            top_level_heading_seen: false,
        }
    }

    pub fn render_block(&mut self, block: &Block) -> Rendered {
        match block {
            Block::Heading { depth, text } => Rendered::Elements(self.heading(*depth, text)),
            Block::Paragraph { text } => Rendered::Elements(self.paragraph(text)),
            Block::List { items } => Rendered::Elements(
                items
                    .iter()
                    .map(|item| DocumentElement::Paragraph(self.bullet_line(item)))
                    .collect(),
            ),
            Block::Table(model) => match self.table(model) {
                Some(table) => Rendered::Elements(vec![table]),
                None => Rendered::Skip,
            },
            Block::Rule => Rendered::Elements(vec![self.rule()]),
            Block::Blank => Rendered::Elements(vec![self.blank()]),
            Block::Unsupported { kind } => {
                log::debug!("no output for {} block", kind);
                Rendered::Skip
            }
        }
    }

    fn heading(&mut self, depth: u8, text: &str) -> Vec<DocumentElement> {
        let heading = &self.config.heading;
        let mut elements = Vec::with_capacity(2);

        // Every top-level heading after the first starts a new page
        if depth == 1 {
            if self.top_level_heading_seen {
                elements.push(DocumentElement::PageBreak);
            }
            self.top_level_heading_seen = true;
        }

        elements.push(DocumentElement::Paragraph(Paragraph {
            runs: vec![Run {
                text: inline::strip_markers(text),
                bold: true,
                size: Some(heading.size_for_depth(depth) * 2),
                ..Default::default()
            }],
            spacing: Spacing {
                before: heading.spacing_before_for_depth(depth),
                after: heading.spacing_after,
                line: Some(heading.line),
            },
            indent_left: None,
            keep_next: true,
        }));

        elements
    }

    fn paragraph(&self, text: &str) -> Vec<DocumentElement> {
        let lines: Vec<&str> = text.split('\n').collect();

        if is_table_candidate(&lines) {
            if let Some(model) = table::parse(&lines) {
                log::debug!(
                    "rebuilt {}x{} table from paragraph text",
                    model.rows.len(),
                    model.column_count()
                );
                if let Some(table) = self.table(&model) {
                    return vec![table];
                }
            }
        }

        lines
            .into_iter()
            .map(|line| {
                let paragraph = match strip_bullet(line) {
                    Some(rest) => self.bullet_line(rest),
                    None => Paragraph {
                        runs: self.runs(line),
                        spacing: self.body_spacing(),
                        ..Default::default()
                    },
                };
                DocumentElement::Paragraph(paragraph)
            })
            .collect()
    }

    fn bullet_line(&self, text: &str) -> Paragraph {
        let text_config = &self.config.text;
        let mut runs = vec![Run::plain(text_config.bullet.as_str(), text_config.size)];
        runs.extend(self.runs(text));

        Paragraph {
            runs,
            spacing: self.body_spacing(),
            indent_left: Some(text_config.bullet_indent),
            keep_next: false,
        }
    }

    fn table(&self, model: &TableModel) -> Option<DocumentElement> {
        let columns = model.column_count();
        if columns == 0 {
            return None;
        }

        let table_config = &self.config.table;
        let column_width = table_config.width / columns as u32;

        let header = TableRow {
            cells: model
                .headers
                .iter()
                .map(|text| TableCell {
                    paragraph: self.cell_paragraph(text),
                    width: column_width,
                    shading: Some(table_config.header_fill.clone()),
                })
                .collect(),
            is_header: true,
        };

        let mut rows = Vec::with_capacity(model.rows.len() + 1);
        rows.push(header);
        rows.extend(model.rows.iter().map(|row| TableRow {
            cells: model
                .cells(row)
                .map(|text| TableCell {
                    paragraph: self.cell_paragraph(text),
                    width: column_width,
                    shading: None,
                })
                .collect(),
            is_header: false,
        }));

        Some(DocumentElement::Table(Table {
            width: table_config.width,
            column_widths: vec![column_width; columns],
            border_size: table_config.border_size,
            rows,
        }))
    }

    fn cell_paragraph(&self, text: &str) -> Paragraph {
        let spacing = self.config.table.cell_spacing;
        Paragraph {
            runs: self.runs(text),
            spacing: Spacing {
                before: spacing,
                after: spacing,
                line: None,
            },
            ..Default::default()
        }
    }

    fn rule(&self) -> DocumentElement {
        let rule = &self.config.rule;
        DocumentElement::Paragraph(Paragraph {
            runs: vec![Run::plain(
                rule.glyph.repeat(rule.length),
                self.config.text.size,
            )],
            spacing: Spacing {
                before: rule.spacing,
                after: rule.spacing,
                line: None,
            },
            ..Default::default()
        })
    }

    fn blank(&self) -> DocumentElement {
        let text = &self.config.text;
        DocumentElement::Paragraph(Paragraph {
            runs: vec![Run::default()],
            spacing: Spacing {
                before: text.spacing_before,
                after: text.spacing_after,
                line: None,
            },
            ..Default::default()
        })
    }

    fn body_spacing(&self) -> Spacing {
        let text = &self.config.text;
        Spacing {
            before: text.spacing_before,
            after: text.spacing_after,
            line: Some(text.line),
        }
    }

    fn runs(&self, text: &str) -> Vec<Run> {
        inline::scan(text)
            .into_iter()
            .map(|fragment| self.run(fragment))
            .collect()
    }

    fn run(&self, fragment: StyledFragment) -> Run {
        let text = &self.config.text;
        Run {
            text: fragment.text,
            bold: fragment.bold,
            italic: fragment.italic,
            font: fragment.code.then(|| text.code_font.clone()),
            size: Some(text.size),
        }
    }
}

/// Text of a `•` or `-` bullet line with the marker removed.
fn strip_bullet(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix('•')
        .or_else(|| line.strip_prefix('-'))
        .map(str::trim)
}

/// Every non-empty line is pipe-delimited.
fn is_table_candidate(lines: &[&str]) -> bool {
    let mut non_empty = lines.iter().filter(|line| !line.trim().is_empty());
    non_empty.clone().count() >= 3 && non_empty.all(|line| line.contains('|'))
}
