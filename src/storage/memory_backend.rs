//! In-memory storage, for tests and for callers that already hold the tree.
//!
//! ```rust
//! use bookconf::storage::{MemoryBackend, Table};
//!
//! let mut backend = MemoryBackend::new();
//! let book = backend.add_root_collection("book", "Book");
//! backend.add_document(&book, "intro", "Intro", vec![Table {
//!     rows: vec![vec!["URL".into(), "https://x/intro".into()]],
//! }]);
//! let ch1 = backend.add_collection(&book, "ch1", "Ch1");
//! backend.add_document(&ch1, "lesson1", "Lesson1", vec![]);
//! ```

use super::backend::{Collection, Document, StorageBackend, StorageEntry, StorageError, Table};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct CollectionRecord {
    name: String,
    documents: Vec<StorageEntry>,
    collections: Vec<StorageEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: HashMap<String, CollectionRecord>,
    documents: HashMap<String, Document>,
    denied: Vec<String>,
    writes: RefCell<Vec<(String, String)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection with no parent. Returns its id.
    pub fn add_root_collection(&mut self, id: &str, name: &str) -> String {
        self.collections.insert(
            id.to_string(),
            CollectionRecord {
                name: name.to_string(),
                ..Default::default()
            },
        );
        id.to_string()
    }

    /// Register a sub-collection, appended after the parent's existing ones.
    ///
    /// Panics if `parent` was never registered.
    pub fn add_collection(&mut self, parent: &str, id: &str, name: &str) -> String {
        self.add_root_collection(id, name);
        self.parent_mut(parent)
            .collections
            .push(StorageEntry::collection(id, name));
        id.to_string()
    }

    /// Register a document, appended after the parent's existing ones.
    ///
    /// Panics if `parent` was never registered.
    pub fn add_document(&mut self, parent: &str, id: &str, name: &str, tables: Vec<Table>) -> String {
        self.documents.insert(
            id.to_string(),
            Document {
                id: id.to_string(),
                name: name.to_string(),
                tables,
            },
        );
        self.parent_mut(parent)
            .documents
            .push(StorageEntry::document(id, name));
        id.to_string()
    }

    /// Make every later access to `id` fail with `PermissionDenied`.
    pub fn deny(&mut self, id: &str) {
        self.denied.push(id.to_string());
    }

    /// `(id, text)` pairs passed to `set_text`, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    fn parent_mut(&mut self, parent: &str) -> &mut CollectionRecord {
        self.collections
            .get_mut(parent)
            .unwrap_or_else(|| panic!("parent collection '{parent}' not registered"))
    }

    fn check_access(&self, id: &str) -> Result<(), StorageError> {
        if self.denied.iter().any(|d| d == id) {
            return Err(StorageError::PermissionDenied(id.to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn collection(&self, id: &str) -> Result<Collection, StorageError> {
        self.check_access(id)?;
        match self.collections.get(id) {
            Some(record) => Ok(Collection {
                id: id.to_string(),
                name: record.name.clone(),
                documents: record.documents.clone(),
                collections: record.collections.clone(),
            }),
            None if self.documents.contains_key(id) => {
                Err(StorageError::NotACollection(id.to_string()))
            }
            None => Err(StorageError::NotFound(id.to_string())),
        }
    }

    fn open_document(&self, id: &str) -> Result<Document, StorageError> {
        self.check_access(id)?;
        match self.documents.get(id) {
            Some(doc) => Ok(doc.clone()),
            None if self.collections.contains_key(id) => {
                Err(StorageError::NotADocument(id.to_string()))
            }
            None => Err(StorageError::NotFound(id.to_string())),
        }
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), StorageError> {
        self.check_access(id)?;
        if !self.documents.contains_key(id) {
            return Err(StorageError::NotFound(id.to_string()));
        }
        self.writes
            .borrow_mut()
            .push((id.to_string(), text.to_string()));
        Ok(())
    }
}
