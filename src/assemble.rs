//! Config assembly: the book tree plus its top-level fields.
//!
//! The title comes from the root collection's name, the static fields from
//! [`BookConfig`], and the generation time from a [`Clock`] so runs can be
//! reproduced in tests.

use crate::config::BookConfig;
use crate::storage::{StorageBackend, StorageError};
use crate::tree;
use crate::types::ConfigRoot;
use chrono::{DateTime, Utc};
use tracing::info;

/// `Date#toString` shape, pinned to UTC: `Tue Jan 02 2024 03:04:05 GMT+0000 (UTC)`.
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z (UTC)";

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render a timestamp for `lastGenerated`. Independent of host locale and zone.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Build the full config for the collection `root_id`.
pub fn assemble(
    backend: &dyn StorageBackend,
    root_id: &str,
    config: &BookConfig,
    clock: &dyn Clock,
) -> Result<ConfigRoot, StorageError> {
    let last_generated = format_timestamp(clock.now());
    let root = backend.collection(root_id)?;
    let book_contents = tree::build(backend, &root, &config.missing_url)?;

    info!(
        title = %root.name,
        entries = book_contents.len(),
        "Assembled book config"
    );

    Ok(ConfigRoot {
        title: root.name,
        langs: config.langs.clone(),
        generation_script: config.generation_script.clone(),
        documentation_link: config.documentation_link.clone(),
        last_generated,
        warning: config.warning.clone(),
        book_contents,
    })
}
