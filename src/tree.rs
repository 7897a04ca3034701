//! Book tree construction.
//!
//! Walks a collection depth-first and mirrors it as a tree of [`BookNode`]s:
//!
//! ```text
//! Book/                     bookContents
//! ├── Intro                 ├── { name: Intro, id, url }
//! ├── Ch1/                  ├── { name: Ch1, contents: [
//! │   └── Lesson1           │       { name: Lesson1, id, url } ] }
//! └── Ch2/                  └── { name: Ch2, contents: [] }
//! ```
//!
//! ## Ordering
//!
//! Within one collection, all documents come first, then all sub-collections.
//! Inside each group the backend's enumeration order is kept as-is; nothing
//! is sorted here.
//!
//! ## Failures
//!
//! A document whose metadata can't be read still gets a leaf, with the
//! `missing_url` placeholder as its URL, and the reason is logged. Storage
//! errors (unknown id, permission denied, IO) abort the whole build.

use crate::metadata;
use crate::storage::{Collection, StorageBackend, StorageEntry, StorageError};
use crate::types::{BookNode, BranchNode, LeafNode};
use tracing::{debug, warn};

/// Build the contents of `collection`, recursing into every sub-collection.
///
/// Returns a fresh sequence per call; branch contents are built by the
/// recursive call for that branch.
pub fn build(
    backend: &dyn StorageBackend,
    collection: &Collection,
    missing_url: &str,
) -> Result<Vec<BookNode>, StorageError> {
    debug!(
        id = %collection.id,
        name = %collection.name,
        documents = collection.documents.len(),
        collections = collection.collections.len(),
        "Visiting collection"
    );

    let mut nodes = Vec::with_capacity(collection.documents.len() + collection.collections.len());

    for entry in &collection.documents {
        nodes.push(BookNode::Leaf(build_leaf(backend, entry, missing_url)?));
    }

    for entry in &collection.collections {
        let child = backend.collection(&entry.id)?;
        nodes.push(BookNode::Branch(BranchNode {
            name: entry.name.clone(),
            contents: build(backend, &child, missing_url)?,
        }));
    }

    Ok(nodes)
}

/// Build the contents of the collection with id `collection_id`.
pub fn build_from_id(
    backend: &dyn StorageBackend,
    collection_id: &str,
    missing_url: &str,
) -> Result<Vec<BookNode>, StorageError> {
    let collection = backend.collection(collection_id)?;
    build(backend, &collection, missing_url)
}

fn build_leaf(
    backend: &dyn StorageBackend,
    entry: &StorageEntry,
    missing_url: &str,
) -> Result<LeafNode, StorageError> {
    let doc = backend.open_document(&entry.id)?;
    let url = match metadata::extract_url(&doc) {
        Ok(url) => url,
        Err(err) => {
            warn!(id = %entry.id, name = %entry.name, "{err}");
            missing_url.to_string()
        }
    };

    Ok(LeafNode {
        name: entry.name.clone(),
        id: entry.id.clone(),
        url,
    })
}

/// Counts over a built tree, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    pub documents: usize,
    pub collections: usize,
    pub missing_urls: usize,
    /// Nesting depth of branches; a flat collection has depth 0.
    pub depth: usize,
}

impl BookStats {
    pub fn of(nodes: &[BookNode], missing_url: &str) -> Self {
        let mut stats = Self::default();
        stats.accumulate(nodes, missing_url, 0);
        stats
    }

    fn accumulate(&mut self, nodes: &[BookNode], missing_url: &str, depth: usize) {
        self.depth = self.depth.max(depth);
        for node in nodes {
            match node {
                BookNode::Leaf(leaf) => {
                    self.documents += 1;
                    if leaf.url == missing_url {
                        self.missing_urls += 1;
                    }
                }
                BookNode::Branch(branch) => {
                    self.collections += 1;
                    self.accumulate(&branch.contents, missing_url, depth + 1);
                }
            }
        }
    }
}

/// All leaves in depth-first order, documents before sub-collections.
pub fn leaves(nodes: &[BookNode]) -> Vec<&LeafNode> {
    let mut out = Vec::new();
    collect_leaves(nodes, &mut out);
    out
}

fn collect_leaves<'a>(nodes: &'a [BookNode], out: &mut Vec<&'a LeafNode>) {
    for node in nodes {
        match node {
            BookNode::Leaf(leaf) => out.push(leaf),
            BookNode::Branch(branch) => collect_leaves(&branch.contents, out),
        }
    }
}
