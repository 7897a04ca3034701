//! # bookconf
//!
//! Generates the config a publishing pipeline needs to build a book out of a
//! tree of documents. Collections become chapters, documents become pages,
//! and each page's canonical URL is read from a metadata table at the top of
//! the document.
//!
//! # Pipeline
//!
//! ```text
//! root collection id
//!   → tree::build       (depth-first walk; metadata::extract_url per document)
//!   → assemble          (title, langs, links, timestamp, warning + tree)
//!   → serialize         (JSON, one-space indent, "key": value)
//!   → text
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`storage`] | [`StorageBackend`](storage::StorageBackend) trait, filesystem and in-memory backends |
//! | [`metadata`] | Reads the `URL` row from a document's first table |
//! | [`tree`] | Builds the ordered tree of leaves and branches |
//! | [`assemble`] | Wraps the tree with top-level fields; [`Clock`](assemble::Clock) injection |
//! | [`serialize`] | JSON encoding with a configurable key/value separator, parsing back, writing to a document |
//! | [`generate`] | One full run: assemble + serialize |
//! | [`config`] | `bookconf.toml` loading and validation |
//! | [`types`] | Output types (`ConfigRoot`, `BookNode`) |
//! | [`output`] | CLI outline and summary formatting |
//!
//! # Failure Model
//!
//! A document with a missing or broken metadata table never stops a run: its
//! leaf gets a visible placeholder URL and the reason is logged. Anything the
//! storage backend can't do (unknown id, permission denied, IO) aborts the
//! run with no output.

pub mod assemble;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod serialize;
pub mod storage;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
