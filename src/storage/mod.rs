//! Document storage: where collections and documents come from.
//!
//! | Backend | Collections | Documents | Tables |
//! |---|---|---|---|
//! | [`FsBackend`] | directories | `*.md` files | Markdown pipe tables |
//! | [`MemoryBackend`] | in-memory tree | in-memory rows | given directly |
//!
//! The module is split into:
//! - **Backend**: [`StorageBackend`] trait + shared entry/document types
//! - **Tables**: Markdown table extraction used by the filesystem backend
//! - **Backends**: [`FsBackend`] and [`MemoryBackend`]

pub mod backend;
pub mod fs_backend;
pub mod memory_backend;
mod tables;

pub use backend::{Collection, Document, EntryKind, StorageBackend, StorageEntry, StorageError, Table};
pub use fs_backend::FsBackend;
pub use memory_backend::MemoryBackend;
