//! Local directory tree as a storage service.
//!
//! ```text
//! library/                  # storage root
//! └── Book/                 # collection "Book"   (id: Book)
//!     ├── Intro.md          # document "Intro"    (id: Book/Intro.md)
//!     ├── notes.txt         # ignored: not a document
//!     └── Ch1/              # collection "Ch1"    (id: Book/Ch1)
//!         └── Lesson1.md    # document "Lesson1"  (id: Book/Ch1/Lesson1.md)
//! ```
//!
//! Ids are `/`-separated paths relative to the storage root; `""` and `.` name
//! the root itself. Hidden entries are skipped, and children are listed in
//! byte-wise name order since the filesystem guarantees no order of its own.
//! Entries whose names aren't valid UTF-8 have no id and are skipped with a
//! warning.

use super::backend::{Collection, Document, StorageBackend, StorageEntry, StorageError};
use super::tables::parse_tables;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an id onto a path under the root. Ids that would escape the root
    /// are reported as not found.
    fn resolve(&self, id: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(id.trim_matches('/'));
        let mut path = self.root.clone();
        for component in rel.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::NotFound(id.to_string()));
                }
            }
        }
        Ok(path)
    }

    fn display_name(&self, id: &str, path: &Path) -> Result<String, StorageError> {
        if let Some(name) = path.file_name() {
            return Ok(name.to_string_lossy().to_string());
        }
        // Root given as "." or "..": ask the filesystem for the real name.
        let canonical = fs::canonicalize(path).map_err(|e| map_io(id, e))?;
        Ok(canonical
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default())
    }
}

fn child_id(parent: &str, file_name: &str) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() || parent == "." {
        file_name.to_string()
    } else {
        format!("{parent}/{file_name}")
    }
}

fn is_document(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
            .unwrap_or(false)
}

fn map_io(id: &str, err: io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(id.to_string()),
        io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(id.to_string()),
        _ => StorageError::Io(err),
    }
}

impl StorageBackend for FsBackend {
    fn collection(&self, id: &str) -> Result<Collection, StorageError> {
        let path = self.resolve(id)?;
        let meta = fs::metadata(&path).map_err(|e| map_io(id, e))?;
        if !meta.is_dir() {
            return Err(StorageError::NotACollection(id.to_string()));
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&path)
            .map_err(|e| map_io(id, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, io::Error>>()
            .map_err(|e| map_io(id, e))?;
        entries.retain(|p| {
            p.file_name()
                .map(|n| !n.to_string_lossy().starts_with('.'))
                .unwrap_or(false)
        });
        entries.sort();

        let mut documents = Vec::new();
        let mut collections = Vec::new();
        for entry in &entries {
            let Some(file_name) = entry.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %entry.display(), "Skipping entry with a non-UTF-8 name");
                continue;
            };
            if entry.is_dir() {
                collections.push(StorageEntry::collection(
                    child_id(id, file_name),
                    file_name,
                ));
            } else if is_document(entry) {
                let stem = entry
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(file_name);
                documents.push(StorageEntry::document(child_id(id, file_name), stem));
            }
        }

        Ok(Collection {
            id: id.to_string(),
            name: self.display_name(id, &path)?,
            documents,
            collections,
        })
    }

    fn open_document(&self, id: &str) -> Result<Document, StorageError> {
        let path = self.resolve(id)?;
        let meta = fs::metadata(&path).map_err(|e| map_io(id, e))?;
        if !meta.is_file() || !is_document(&path) {
            return Err(StorageError::NotADocument(id.to_string()));
        }
        let content = fs::read_to_string(&path).map_err(|e| map_io(id, e))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Document {
            id: id.to_string(),
            name,
            tables: parse_tables(&content),
        })
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), StorageError> {
        let path = self.resolve(id)?;
        let meta = fs::metadata(&path).map_err(|e| map_io(id, e))?;
        if !meta.is_file() || !is_document(&path) {
            return Err(StorageError::NotADocument(id.to_string()));
        }
        fs::write(&path, text).map_err(|e| map_io(id, e))
    }
}
