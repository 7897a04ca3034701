//! Document metadata extraction.
//!
//! Each document carries its metadata in the **first table** of its body, used
//! as a key-value store: column 0 is the field name, column 1 the value.
//!
//! ```text
//! | URL    | https://example.com/intro |
//! | Author | Someone                   |
//! ```
//!
//! ## Lookup rules
//!
//! - Only the first table is consulted; later tables are ordinary content.
//! - Rows are scanned top to bottom. The field name is trimmed and compared
//!   case-insensitively, so `URL`, `url` and `Url` all match and `Link` doesn't.
//! - The first matching row wins, even if its value is empty.
//! - The value is trimmed. A blank value, or a row with no second cell, is
//!   a [`MetadataError::EmptyUrlValue`].
//!
//! Extraction never touches storage: it works on an already opened
//! [`Document`], and its errors describe the document, not the backend.
//! Turning an error into the placeholder URL is the tree builder's job.

use crate::storage::Document;
use thiserror::Error;

/// Field name of the canonical URL row.
pub const URL_FIELD: &str = "URL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Doc \"{0}\": Missing metadata table (no tables found in doc)")]
    MissingMetadataTable(String),
    #[error("Doc \"{0}\": Missing URL field in metadata table")]
    MissingUrlField(String),
    #[error("Doc \"{0}\": Missing URL value in metadata table")]
    EmptyUrlValue(String),
}

/// Read the canonical URL from the document's metadata table.
pub fn extract_url(doc: &Document) -> Result<String, MetadataError> {
    let table = doc
        .tables
        .first()
        .ok_or_else(|| MetadataError::MissingMetadataTable(doc.name.clone()))?;

    let row = table
        .rows
        .iter()
        .find(|row| {
            row.first()
                .map(|name| name.trim().eq_ignore_ascii_case(URL_FIELD))
                .unwrap_or(false)
        })
        .ok_or_else(|| MetadataError::MissingUrlField(doc.name.clone()))?;

    row.get(1)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or_else(|| MetadataError::EmptyUrlValue(doc.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Table;

    fn doc(tables: Vec<Vec<Vec<&str>>>) -> Document {
        Document {
            id: "doc-1".into(),
            name: "Intro".into(),
            tables: tables
                .into_iter()
                .map(|rows| Table {
                    rows: rows
                        .into_iter()
                        .map(|row| row.into_iter().map(String::from).collect())
                        .collect(),
                })
                .collect(),
        }
    }

    // =========================================================================
    // Success
    // =========================================================================

    #[test]
    fn single_url_row_returns_value_exactly() {
        let d = doc(vec![vec![vec!["URL", "https://x"]]]);
        assert_eq!(extract_url(&d), Ok("https://x".to_string()));
    }

    #[test]
    fn field_name_is_case_insensitive() {
        for name in ["URL", "url", "Url", " URL "] {
            let d = doc(vec![vec![vec![name, "https://x"]]]);
            assert_eq!(extract_url(&d), Ok("https://x".to_string()), "field {name:?}");
        }
    }

    #[test]
    fn url_row_found_below_other_rows() {
        let d = doc(vec![vec![
            vec!["Title", "Intro"],
            vec!["Author", "Someone"],
            vec!["url", "https://x/intro"],
        ]]);
        assert_eq!(extract_url(&d), Ok("https://x/intro".to_string()));
    }

    #[test]
    fn first_matching_row_wins() {
        let d = doc(vec![vec![
            vec!["URL", "https://first"],
            vec!["URL", "https://second"],
        ]]);
        assert_eq!(extract_url(&d), Ok("https://first".to_string()));
    }

    #[test]
    fn value_is_trimmed() {
        let d = doc(vec![vec![vec!["URL", "  https://x  "]]]);
        assert_eq!(extract_url(&d), Ok("https://x".to_string()));
    }

    #[test]
    fn equals_sign_in_value_is_preserved() {
        let d = doc(vec![vec![vec!["URL", "https://x/?a=b&c=d"]]]);
        assert_eq!(extract_url(&d), Ok("https://x/?a=b&c=d".to_string()));
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[test]
    fn no_tables_is_missing_table() {
        let d = doc(vec![]);
        assert_eq!(
            extract_url(&d),
            Err(MetadataError::MissingMetadataTable("Intro".into()))
        );
    }

    #[test]
    fn no_url_row_is_missing_field() {
        let d = doc(vec![vec![vec!["Title", "Intro"]]]);
        assert_eq!(
            extract_url(&d),
            Err(MetadataError::MissingUrlField("Intro".into()))
        );
    }

    #[test]
    fn link_is_not_url() {
        let d = doc(vec![vec![vec!["Link", "https://x"]]]);
        assert!(matches!(extract_url(&d), Err(MetadataError::MissingUrlField(_))));
    }

    #[test]
    fn only_first_table_is_consulted() {
        let d = doc(vec![
            vec![vec!["Title", "Intro"]],
            vec![vec!["URL", "https://x"]],
        ]);
        assert!(matches!(extract_url(&d), Err(MetadataError::MissingUrlField(_))));
    }

    #[test]
    fn blank_value_is_empty_url() {
        let d = doc(vec![vec![vec!["URL", "   "]]]);
        assert_eq!(
            extract_url(&d),
            Err(MetadataError::EmptyUrlValue("Intro".into()))
        );
    }

    #[test]
    fn missing_value_cell_is_empty_url() {
        let d = doc(vec![vec![vec!["URL"]]]);
        assert!(matches!(extract_url(&d), Err(MetadataError::EmptyUrlValue(_))));
    }

    #[test]
    fn empty_first_match_is_not_rescued_by_later_row() {
        let d = doc(vec![vec![vec!["URL", ""], vec!["URL", "https://x"]]]);
        assert!(matches!(extract_url(&d), Err(MetadataError::EmptyUrlValue(_))));
    }

    #[test]
    fn error_messages_name_the_document() {
        let err = MetadataError::MissingMetadataTable("Intro".into());
        assert_eq!(
            err.to_string(),
            "Doc \"Intro\": Missing metadata table (no tables found in doc)"
        );
    }
}
