//! Markdown table extraction.
//!
//! Documents on disk are Markdown; their tables are GitHub-flavoured pipe
//! tables. The header row becomes row 0, so a metadata table can be written
//! either with a real header or with the first field in the header slot:
//!
//! ```text
//! | URL   | https://example.com/intro |
//! |-------|---------------------------|
//! | Title | Intro                     |
//! ```

use super::backend::Table;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// All tables in `markdown`, in document order, with trimmed cell text.
pub(crate) fn parse_tables(markdown: &str) -> Vec<Table> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);

    let mut tables = Vec::new();
    let mut table: Option<Table> = None;
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Table(_)) => table = Some(Table::default()),
            Event::End(TagEnd::Table) => tables.extend(table.take()),
            Event::Start(Tag::TableHead | Tag::TableRow) => row.clear(),
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => {
                if let Some(t) = table.as_mut() {
                    t.rows.push(std::mem::take(&mut row));
                }
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(TagEnd::TableCell) => {
                if let Some(text) = cell.take() {
                    row.push(text.trim().to_string());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(c) = cell.as_mut() {
                    c.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(c) = cell.as_mut() {
                    c.push(' ');
                }
            }
            _ => {}
        }
    }

    tables
}
