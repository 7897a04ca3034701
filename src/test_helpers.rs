//! Shared test utilities for the bookconf test suite.
//!
//! Provides the in-memory "Book" fixture, table builders, and lookup helpers
//! that work with built trees (`BookNode`, `LeafNode`, `BranchNode`).
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let backend = book_backend();
//! let nodes = tree::build_from_id(&backend, BOOK_ID, MISSING).unwrap();
//!
//! assert_eq!(find_leaf(&nodes, "Intro").url, "https://x/intro");
//! assert_eq!(names(&find_branch(&nodes, "Ch1").contents), vec!["Lesson1"]);
//! ```

use crate::assemble::FixedClock;
use crate::config::BookConfig;
use crate::storage::{MemoryBackend, Table};
use crate::types::{BookNode, BranchNode, LeafNode};
use chrono::{TimeZone, Utc};

pub const MISSING: &str = "MISSING! Check the appropriate doc";
pub const BOOK_ID: &str = "book";

// =========================================================================
// Fixtures
// =========================================================================

/// A metadata table with a single `URL` row.
pub fn url_table(url: &str) -> Table {
    Table {
        rows: vec![vec!["URL".to_string(), url.to_string()]],
    }
}

/// Root "Book" with document "Intro" (valid URL) and sub-collection "Ch1"
/// holding document "Lesson1" (no metadata table).
pub fn book_backend() -> MemoryBackend {
    let mut backend = MemoryBackend::new();
    let book = backend.add_root_collection(BOOK_ID, "Book");
    backend.add_document(&book, "intro-id", "Intro", vec![url_table("https://x/intro")]);
    let ch1 = backend.add_collection(&book, "ch1-id", "Ch1");
    backend.add_document(&ch1, "lesson1-id", "Lesson1", vec![]);
    backend
}

/// A chain `level-0/level-1/.../level-{depth}`, one document per level.
pub fn nested_chain(depth: usize) -> MemoryBackend {
    let mut backend = MemoryBackend::new();
    let mut parent = backend.add_root_collection("level-0", "Level 0");
    backend.add_document(&parent, "doc-0", "Doc 0", vec![url_table("https://x/0")]);
    for level in 1..=depth {
        parent = backend.add_collection(
            &parent,
            &format!("level-{level}"),
            &format!("Level {level}"),
        );
        backend.add_document(
            &parent,
            &format!("doc-{level}"),
            &format!("Doc {level}"),
            vec![url_table(&format!("https://x/{level}"))],
        );
    }
    backend
}

/// Stock config with the placeholder pinned to [`MISSING`].
pub fn test_config() -> BookConfig {
    BookConfig {
        root_collection: BOOK_ID.to_string(),
        missing_url: MISSING.to_string(),
        ..BookConfig::default()
    }
}

/// Clock frozen at 2024-01-02 03:04:05 UTC.
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
}

// =========================================================================
// Tree lookups — panics with a clear message on miss
// =========================================================================

/// Names of the nodes at one level, in order.
pub fn names(nodes: &[BookNode]) -> Vec<&str> {
    nodes.iter().map(BookNode::name).collect()
}

/// Find a leaf by name at this level. Panics if not found.
pub fn find_leaf<'a>(nodes: &'a [BookNode], name: &str) -> &'a LeafNode {
    nodes
        .iter()
        .filter_map(BookNode::as_leaf)
        .find(|l| l.name == name)
        .unwrap_or_else(|| panic!("leaf '{name}' not found. Available: {:?}", names(nodes)))
}

/// Find a branch by name at this level. Panics if not found.
pub fn find_branch<'a>(nodes: &'a [BookNode], name: &str) -> &'a BranchNode {
    nodes
        .iter()
        .filter_map(BookNode::as_branch)
        .find(|b| b.name == name)
        .unwrap_or_else(|| panic!("branch '{name}' not found. Available: {:?}", names(nodes)))
}
