use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::block::Block;
use crate::table::TableModel;

/// Tokenize markdown into a flat list of blocks carrying raw source text.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut state = ParseState::new(markdown);

    for (event, range) in parser.into_offset_iter() {
        process_event(event, range, &mut state);
    }

    log::debug!("tokenized {} blocks", state.blocks.len());
    state.blocks
}

struct ParseState<'a> {
    source: &'a str,
    blocks: Vec<Block>,

    // Number of currently open tags
    depth: usize,
    // While set, events are ignored until `depth` drops back to this value
    skip_until: Option<usize>,
    // Source offset where the previous top-level block ended
    last_block_end: Option<usize>,

    // Source span of the inline content being collected
    inline: Option<Range<usize>>,

    heading_depth: Option<u8>,

    // List state
    list_depth: usize,
    list_items: Vec<String>,
    item_flushed: bool,

    // Table state
    table: TableModel,
    current_row: Vec<String>,
    in_table_head: bool,
}

impl<'a> ParseState<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            blocks: Vec::new(),
            depth: 0,
            skip_until: None,
            last_block_end: None,
            inline: None,
            heading_depth: None,
            list_depth: 0,
            list_items: Vec::new(),
            item_flushed: false,
            table: TableModel::default(),
            current_row: Vec::new(),
            in_table_head: false,
        }
    }

    fn extend_inline(&mut self, range: Range<usize>) {
        self.inline = Some(match self.inline.take() {
            Some(current) => current.start.min(range.start)..current.end.max(range.end),
            None => range,
        });
    }

    fn take_inline(&mut self) -> Option<String> {
        self.inline
            .take()
            .map(|range| self.source[range].trim().to_string())
    }

    /// Push the collected item text as its own bullet. Text that follows a
    /// nested list is flushed again and becomes a bullet after the children.
    fn flush_item(&mut self) {
        if let Some(text) = self.take_inline() {
            self.list_items.push(unindent_item(&text));
            self.item_flushed = true;
        }
    }

    /// Emit a blank block when two top-level blocks are separated by more
    /// than the single empty line that normally divides them.
    fn begin_block(&mut self, start: usize) {
        if let Some(end) = self.last_block_end {
            if blank_lines_between(self.source, end, start) >= 2 {
                self.blocks.push(Block::Blank);
            }
        }
    }

    fn start_skip(&mut self, kind: &'static str) {
        let level = self.depth - 1;
        if level == 0 {
            log::debug!("skipping unsupported {} block", kind);
            self.blocks.push(Block::Unsupported { kind });
        }
        self.skip_until = Some(level);
    }
}

/// Drop continuation indentation and the empty lines between paragraphs of
/// a loose item, keeping one line per source line.
fn unindent_item(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn blank_lines_between(source: &str, end: usize, start: usize) -> usize {
    if start <= end {
        return 0;
    }
    let mut lines = source[end..start].split('\n');
    if !source[..end].ends_with('\n') {
        // Remainder of the previous block's last line
        lines.next();
    }
    let lines: Vec<&str> = lines.collect();
    // The final piece is the unterminated start of the next block's line
    lines[..lines.len().saturating_sub(1)]
        .iter()
        .filter(|line| line.trim().is_empty())
        .count()
}

fn process_event(event: Event, range: Range<usize>, state: &mut ParseState) {
    if let Some(level) = state.skip_until {
        match event {
            Event::Start(_) => state.depth += 1,
            Event::End(_) => {
                state.depth -= 1;
                if state.depth == level {
                    state.skip_until = None;
                    if level == 0 {
                        state.last_block_end = Some(range.end);
                    }
                }
            }
            _ => {}
        }
        return;
    }

    if state.depth == 0 && matches!(event, Event::Start(_) | Event::Rule) {
        state.begin_block(range.start);
    }

    match event {
        Event::Start(tag) => {
            state.depth += 1;
            match tag {
                // Headings
                Tag::Heading { level, .. } if state.list_depth == 0 => {
                    state.heading_depth = Some(heading_level_to_u8(level));
                    state.inline = None;
                }

                // Paragraphs inside list items feed the item text
                Tag::Paragraph => {
                    if state.list_depth == 0 {
                        state.inline = None;
                    }
                }

                // Lists
                Tag::List(_) => {
                    if state.list_depth > 0 {
                        state.flush_item();
                    }
                    state.list_depth += 1;
                }
                Tag::Item => {
                    state.inline = None;
                    state.item_flushed = false;
                }

                // Tables
                Tag::Table(_) if state.list_depth == 0 => {
                    state.table = TableModel::default();
                }
                Tag::TableHead => {
                    state.in_table_head = true;
                    state.current_row.clear();
                }
                Tag::TableRow => {
                    state.current_row.clear();
                }
                Tag::TableCell => {
                    state.inline = None;
                }

                // Inline formatting stays part of the raw text
                Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Link { .. }
                | Tag::Image { .. } => state.extend_inline(range),
                Tag::Heading { .. } => state.extend_inline(range),

                Tag::CodeBlock(_) => state.start_skip("code"),
                Tag::BlockQuote(_) => state.start_skip("blockquote"),
                Tag::HtmlBlock => state.start_skip("html"),
                Tag::FootnoteDefinition(_) => state.start_skip("footnote"),
                Tag::MetadataBlock(_) => state.start_skip("metadata"),
                _ => state.start_skip("other"),
            }
        }

        Event::End(tag_end) => {
            state.depth -= 1;
            match tag_end {
                TagEnd::Heading(_) if state.heading_depth.is_some() => {
                    if let Some(depth) = state.heading_depth.take() {
                        let text = state.take_inline().unwrap_or_default();
                        state.blocks.push(Block::Heading { depth, text });
                    }
                }

                TagEnd::Paragraph => {
                    if state.list_depth == 0 {
                        if let Some(text) = state.take_inline() {
                            if !text.is_empty() {
                                state.blocks.push(Block::Paragraph { text });
                            }
                        }
                    }
                }

                TagEnd::Item => {
                    state.flush_item();
                    if !state.item_flushed {
                        state.list_items.push(String::new());
                        state.item_flushed = true;
                    }
                }
                TagEnd::List(_) => {
                    state.list_depth -= 1;
                    if state.list_depth == 0 {
                        let items = std::mem::take(&mut state.list_items);
                        state.blocks.push(Block::List { items });
                    }
                }

                TagEnd::TableCell => {
                    let text = state.take_inline().unwrap_or_default();
                    state.current_row.push(text);
                }
                TagEnd::TableHead => {
                    state.in_table_head = false;
                    state.table.headers = std::mem::take(&mut state.current_row);
                }
                TagEnd::TableRow => {
                    if !state.in_table_head {
                        let row = std::mem::take(&mut state.current_row);
                        state.table.rows.push(row);
                    }
                }
                TagEnd::Table => {
                    let table = std::mem::take(&mut state.table);
                    state.blocks.push(Block::Table(table));
                }

                _ => state.extend_inline(range.clone()),
            }

            if state.depth == 0 {
                state.last_block_end = Some(range.end);
            }
        }

        // Horizontal rule
        Event::Rule => {
            if state.depth == 0 {
                state.blocks.push(Block::Rule);
                state.last_block_end = Some(range.end);
            }
        }

        // Text, code spans, breaks and inline html
        _ => state.extend_inline(range),
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
