//! One generation run: assemble, then encode.
//!
//! This is the entry point library callers want; the CLI is a thin layer on
//! top. Either the whole config is produced or the run fails; nothing is
//! partially written.

use crate::assemble::{self, Clock};
use crate::config::BookConfig;
use crate::serialize::{self, SerializeError};
use crate::storage::{StorageBackend, StorageError};
use crate::types::ConfigRoot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

/// The assembled config and its encoded text.
#[derive(Debug, Clone)]
pub struct Generated {
    pub root: ConfigRoot,
    pub text: String,
}

/// Generate the config for `config.root_collection`.
pub fn generate(
    backend: &dyn StorageBackend,
    config: &BookConfig,
    clock: &dyn Clock,
) -> Result<Generated, GenerateError> {
    generate_for(backend, &config.root_collection, config, clock)
}

/// Generate the config for an explicit root collection.
pub fn generate_for(
    backend: &dyn StorageBackend,
    root_id: &str,
    config: &BookConfig,
    clock: &dyn Clock,
) -> Result<Generated, GenerateError> {
    let root = assemble::assemble(backend, root_id, config, clock)?;
    let text = serialize::serialize(&root, &config.output)?;
    Ok(Generated { root, text })
}

/// Parse generated text back and write it into document `doc_id`.
pub fn publish_to_document(
    backend: &dyn StorageBackend,
    text: &str,
    doc_id: &str,
) -> Result<(), GenerateError> {
    let root = serialize::parse(text)?;
    serialize::write_to_document(backend, doc_id, &root)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn generate_uses_configured_root() {
        let backend = book_backend();
        let generated = generate(&backend, &test_config(), &fixed_clock()).unwrap();
        assert_eq!(generated.root.title, "Book");
        assert!(generated.text.starts_with("{\n \"title\": \"Book\","));
    }

    #[test]
    fn generate_is_deterministic_with_fixed_clock() {
        let backend = book_backend();
        let a = generate(&backend, &test_config(), &fixed_clock()).unwrap();
        let b = generate(&backend, &test_config(), &fixed_clock()).unwrap();
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn storage_failure_produces_no_output() {
        let mut backend = book_backend();
        backend.deny("ch1-id");
        let result = generate(&backend, &test_config(), &fixed_clock());
        assert!(matches!(result, Err(GenerateError::Storage(_))));
    }

    #[test]
    fn publish_writes_parsed_config() {
        let mut backend = book_backend();
        backend.add_document(BOOK_ID, "out-id", "Out", vec![]);
        let generated = generate(&backend, &test_config(), &fixed_clock()).unwrap();

        publish_to_document(&backend, &generated.text, "out-id").unwrap();

        let writes = backend.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            serialize::parse(&writes[0].1).unwrap(),
            generated.root
        );
    }

    #[test]
    fn publish_rejects_unparseable_text() {
        let backend = book_backend();
        let result = publish_to_document(&backend, "not json", "intro-id");
        assert!(matches!(result, Err(GenerateError::Serialize(_))));
        assert!(backend.writes().is_empty());
    }
}
