//! Loading field declarations from TOML or JSON.
//!
//! Each top-level table is one field, keyed by name:
//!
//! ```toml
//! [region]
//! description = "Deployment region"
//! type = "string"
//! values = ["us-east", "eu-west"]
//! env-var = "REGION"
//! ```
//!
//! JSON uses the same keys. Strict mode (TOML only) rejects properties that
//! no attribute understands; see [`validate`](crate::validate).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SchemaError;
use crate::types::Fields;
use crate::validate;

const INLINE: &str = "<inline>";

/// Read declarations from `path`.
///
/// Files ending in `.json` are parsed as JSON, anything else as TOML.
pub fn load_fields(path: &Path, strict: bool) -> Result<Fields, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "loading field declarations");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&content, path),
        _ => parse_toml(&content, path, strict),
    }
}

fn parse_toml(content: &str, path: &Path, strict: bool) -> Result<Fields, SchemaError> {
    if strict {
        validate::validate_unknown_keys(content, path)?;
    }
    toml::from_str(content).map_err(|e| SchemaError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_json(content: &str, path: &Path) -> Result<Fields, SchemaError> {
    serde_json::from_str(content).map_err(|e| SchemaError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })
}

impl Fields {
    pub fn from_toml_str(content: &str, strict: bool) -> Result<Self, SchemaError> {
        parse_toml(content, &PathBuf::from(INLINE), strict)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        parse_json(content, &PathBuf::from(INLINE))
    }

    /// Pretty-printed JSON using the external attribute keys.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
