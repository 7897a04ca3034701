//! Generator configuration.
//!
//! Handles loading and validating `bookconf.toml`. Every key is optional:
//! stock defaults are serialized to a TOML table and the user file is merged
//! on top of it, so a config only needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! storage_root = "."                # Directory the filesystem backend serves
//! root_collection = ""              # Collection id of the book ("" = storage root)
//! langs = ["en"]                    # Language codes listed in the output
//! generation_script = "https://..." # Link back to this generator
//! documentation_link = "https://github.com/nasearle/publishing-build-tools"
//! warning = "WARNING: Check the config file order before publishing"
//! missing_url = "MISSING! Check the appropriate doc"
//!
//! [output]
//! indent = " "                      # One unit of indentation per nesting level
//! separator = ": "                  # Between each key and its value
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const GENERATION_SCRIPT: &str = "https://script.google.com/a/macros/google.com/d/1wsn8TztnMUJqouazVgBzuRSSriT9FRujHRvf_y0gpH0nKtcdfRsOLN3b/edit?usp=sharing_eil&ts=59c538f8";

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "bookconf.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `bookconf.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Directory served by the filesystem backend.
    pub storage_root: String,
    /// Id of the collection holding the book.
    pub root_collection: String,
    /// Language codes, copied to `langs` in the output.
    pub langs: Vec<String>,
    /// Link to the generator, copied to `generationScript`.
    pub generation_script: String,
    /// Link to the publishing docs, copied to `documentationLink`.
    pub documentation_link: String,
    /// Banner copied to `warning`.
    pub warning: String,
    /// URL placed on leaves whose metadata can't be read.
    pub missing_url: String,
    pub output: OutputConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            storage_root: ".".to_string(),
            root_collection: String::new(),
            langs: vec!["en".to_string()],
            generation_script: GENERATION_SCRIPT.to_string(),
            documentation_link: "https://github.com/nasearle/publishing-build-tools".to_string(),
            warning: "WARNING: Check the config file order before publishing".to_string(),
            missing_url: "MISSING! Check the appropriate doc".to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl BookConfig {
    /// Validate values the serializer and tree builder rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.missing_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "missing_url must not be empty".into(),
            ));
        }
        if self.langs.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "langs must not contain empty codes".into(),
            ));
        }
        self.output.validate()
    }
}

/// Text layout of the generated config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Indentation unit per nesting level. Whitespace only.
    pub indent: String,
    /// Key/value separator. Must be `:` with optional surrounding whitespace.
    pub separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: " ".to_string(),
            separator: ": ".to_string(),
        }
    }
}

impl OutputConfig {
    /// Reject layouts that would make the output unparseable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indent.chars().all(|c| matches!(c, ' ' | '\t')) {
            return Err(ConfigError::Validation(
                "output.indent must contain only spaces or tabs".into(),
            ));
        }
        if self.separator.trim_matches(|c| c == ' ' || c == '\t') != ":" {
            return Err(ConfigError::Validation(
                "output.separator must be ':' optionally surrounded by spaces".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`BookConfig::default`] as a TOML table, the base every file is laid over.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BookConfig::default()).expect("default config must serialize")
}

/// Lay the keys of a `bookconf.toml` over the defaults.
///
/// `[output]` is merged key by key, so setting only `separator` keeps the
/// default `indent`. Top-level values and `langs` are replaced whole.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `bookconf.toml` without applying defaults.
///
/// A missing file is not an error: it yields `None` and the run uses the
/// stock config.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Turn the defaults plus the user's keys (if any) into a checked [`BookConfig`].
///
/// Unknown keys fail here through `deny_unknown_fields`, bad layouts through
/// [`BookConfig::validate`].
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BookConfig, ConfigError> {
    let config: BookConfig = overlay.into_iter().fold(base, merge_toml).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it's absent.
pub fn load_config(path: &Path) -> Result<BookConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `bookconf.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# bookconf Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory served as the document store. Sub-directories are collections,
# *.md files are documents, and a document's first Markdown table holds its
# metadata (a row whose first cell is "URL").
storage_root = "."

# Id of the collection holding the book, relative to storage_root.
# "" means storage_root itself.
root_collection = ""

# Language codes listed in the generated config.
langs = ["en"]

# Link back to this generator, recorded as "generationScript".
generation_script = "https://script.google.com/a/macros/google.com/d/1wsn8TztnMUJqouazVgBzuRSSriT9FRujHRvf_y0gpH0nKtcdfRsOLN3b/edit?usp=sharing_eil&ts=59c538f8"

# Documentation for the publishing process, recorded as "documentationLink".
documentation_link = "https://github.com/nasearle/publishing-build-tools"

# Banner recorded as "warning".
warning = "WARNING: Check the config file order before publishing"

# URL written for documents whose metadata table is missing, has no URL
# row, or has an empty URL value.
missing_url = "MISSING! Check the appropriate doc"

# ---------------------------------------------------------------------------
# Output layout
# ---------------------------------------------------------------------------
[output]
# Indentation added per nesting level (spaces or tabs).
indent = " "

# Written between each key and its value. Must be ":" with optional spaces.
separator = ": "
"##
}
