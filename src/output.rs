//! CLI output formatting.
//!
//! # Output Format
//!
//! `check` prints the book as an outline, one entity per line, with the
//! document id as indented context and a marker on leaves whose URL is the
//! missing-metadata placeholder:
//!
//! ```text
//! Book
//!     001 Intro → https://x/intro
//!         Source: Book/Intro.md
//!     002 Ch1/
//!         001 Lesson1 → MISSING
//!             Source: Book/Ch1/Lesson1.md
//!
//! 2 documents, 1 collection, 1 missing URL
//! ```
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::tree::BookStats;
use crate::types::{BookNode, ConfigRoot};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn format_nodes(nodes: &[BookNode], missing_url: &str, depth: usize, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let index = format_index(i + 1);
        match node {
            BookNode::Leaf(leaf) => {
                let url = if leaf.url == missing_url {
                    "MISSING"
                } else {
                    leaf.url.as_str()
                };
                lines.push(format!("{}{} {} → {}", indent(depth), index, leaf.name, url));
                lines.push(format!("{}Source: {}", indent(depth + 1), leaf.id));
            }
            BookNode::Branch(branch) => {
                lines.push(format!("{}{} {}/", indent(depth), index, branch.name));
                format_nodes(&branch.contents, missing_url, depth + 1, lines);
            }
        }
    }
}

/// Outline of the whole book, title first.
pub fn format_tree(root: &ConfigRoot, missing_url: &str) -> Vec<String> {
    let mut lines = vec![root.title.clone()];
    format_nodes(&root.book_contents, missing_url, 1, &mut lines);
    lines
}

/// One-line totals.
pub fn format_summary(stats: &BookStats) -> String {
    format!(
        "{}, {}, {}",
        plural(stats.documents, "document", "documents"),
        plural(stats.collections, "collection", "collections"),
        plural(stats.missing_urls, "missing URL", "missing URLs"),
    )
}

/// Lines for `check`: outline, blank line, summary.
pub fn format_check_output(root: &ConfigRoot, missing_url: &str) -> Vec<String> {
    let stats = BookStats::of(&root.book_contents, missing_url);
    let mut lines = format_tree(root, missing_url);
    lines.push(String::new());
    lines.push(format_summary(&stats));
    lines
}

pub fn print_check_output(root: &ConfigRoot, missing_url: &str) {
    for line in format_check_output(root, missing_url) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn book_root() -> ConfigRoot {
        assemble(&book_backend(), BOOK_ID, &test_config(), &fixed_clock()).unwrap()
    }

    #[test]
    fn check_output_outlines_book() {
        let lines = format_check_output(&book_root(), MISSING);
        assert_eq!(
            lines,
            vec![
                "Book",
                "    001 Intro → https://x/intro",
                "        Source: intro-id",
                "    002 Ch1/",
                "        001 Lesson1 → MISSING",
                "            Source: lesson1-id",
                "",
                "2 documents, 1 collection, 1 missing URL",
            ]
        );
    }

    #[test]
    fn summary_pluralizes() {
        let stats = BookStats {
            documents: 1,
            collections: 0,
            missing_urls: 2,
            depth: 0,
        };
        assert_eq!(
            format_summary(&stats),
            "1 document, 0 collections, 2 missing URLs"
        );
    }

    #[test]
    fn empty_book_is_title_only() {
        let mut root = book_root();
        root.book_contents.clear();
        assert_eq!(format_tree(&root, MISSING), vec!["Book"]);
    }
}
