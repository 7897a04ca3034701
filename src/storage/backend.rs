//! Storage backend trait and shared types.
//!
//! The [`StorageBackend`] trait defines the three operations the generator
//! needs from a storage service: read a collection's listing, open a document,
//! and replace a document's text.
//!
//! Every failure here is fatal to a generation run. Per-document metadata
//! problems are a separate concern handled in [`crate::metadata`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No such collection or document: {0}")]
    NotFound(String),
    #[error("Not a collection: {0}")]
    NotACollection(String),
    #[error("Not a document: {0}")]
    NotADocument(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Document,
    Collection,
}

/// Handle to a document or collection as listed by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
}

impl StorageEntry {
    pub fn document(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::Document,
        }
    }

    pub fn collection(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::Collection,
        }
    }
}

/// A collection's own name plus its direct children.
///
/// Both lists are in the order the backend enumerates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub documents: Vec<StorageEntry>,
    pub collections: Vec<StorageEntry>,
}

/// A table as rows of cell texts. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Text of a cell, `None` when the row or cell doesn't exist.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// An opened document: its name and the tables in its body, in body order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub tables: Vec<Table>,
}

/// Trait for storage backends.
///
/// The generator is backend-agnostic: it only walks collections, opens
/// documents and (optionally) writes one back.
pub trait StorageBackend {
    /// List a collection's direct documents and sub-collections.
    fn collection(&self, id: &str) -> Result<Collection, StorageError>;

    /// Open a document and read its tables.
    fn open_document(&self, id: &str) -> Result<Document, StorageError>;

    /// Replace a document's entire text.
    fn set_text(&self, id: &str, text: &str) -> Result<(), StorageError>;
}
