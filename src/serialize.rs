//! Text encoding of the generated config.
//!
//! The output is JSON laid out for diffing: one indentation unit per nesting
//! level (a single space by default) and a configurable key/value separator
//! (`": "` by default):
//!
//! ```text
//! {
//!  "title": "Book",
//!  "langs": [
//!   "en"
//!  ],
//!  ...
//! }
//! ```
//!
//! The separator is written by the encoder itself ([`BookFormatter`]), never
//! patched into the text afterwards, so an `=` or `:` inside a title or URL
//! is left alone.

use crate::config::OutputConfig;
use crate::storage::{StorageBackend, StorageError};
use crate::types::ConfigRoot;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Encoded output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Pretty JSON formatter with a caller-chosen key/value separator.
///
/// Everything except the separator is delegated to [`PrettyFormatter`].
pub struct BookFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    separator: &'a [u8],
}

impl<'a> BookFormatter<'a> {
    pub fn new(indent: &'a str, separator: &'a str) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(indent.as_bytes()),
            separator: separator.as_bytes(),
        }
    }
}

impl Formatter for BookFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.separator)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}

/// Encode any value with the configured layout.
pub fn to_string_with<T: Serialize + ?Sized>(
    value: &T,
    output: &OutputConfig,
) -> Result<String, SerializeError> {
    let mut buf = Vec::new();
    let formatter = BookFormatter::new(&output.indent, &output.separator);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Encode the config with the configured layout.
pub fn serialize(root: &ConfigRoot, output: &OutputConfig) -> Result<String, SerializeError> {
    to_string_with(root, output)
}

/// Read encoded text back into a config.
pub fn parse(text: &str) -> Result<ConfigRoot, SerializeError> {
    Ok(serde_json::from_str(text)?)
}

/// Replace the body of document `doc_id` with the config as pretty JSON.
pub fn write_to_document(
    backend: &dyn StorageBackend,
    doc_id: &str,
    root: &ConfigRoot,
) -> Result<(), SerializeError> {
    let text = to_string_with(root, &OutputConfig::default())?;
    backend.set_text(doc_id, &text)?;
    Ok(())
}
