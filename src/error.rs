use std::path::PathBuf;

use thiserror::Error;
use toml::Value;

use crate::checker::{path_prefix, plain};
use crate::types::FieldType;

/// A raw value did not satisfy a [`Checker`](crate::checker::Checker).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("{}expected {expected}, got {got}", path_prefix(.path))]
    Expected {
        path: String,
        expected: &'static str,
        got: String,
    },

    #[error("{}expected {expected}, got nothing", path_prefix(.path))]
    Missing {
        path: String,
        expected: &'static str,
    },

    #[error(
        "{}expected one of {}, got {}",
        path_prefix(.path),
        candidate_list(.candidates),
        plain(.got)
    )]
    NotOneOf {
        path: String,
        candidates: Vec<Value>,
        got: Value,
    },

    #[error("{}{reason}", path_prefix(.path))]
    Parse { path: String, reason: String },
}

fn candidate_list(candidates: &[Value]) -> String {
    let items: Vec<String> = candidates.iter().map(plain).collect();
    format!("[{}]", items.join(" "))
}

/// Errors from compiling or loading field declarations, and from loading
/// [`FillerSettings`](crate::settings::FillerSettings).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{field}: invalid type \"{type_name}\"")]
    InvalidType { field: String, type_name: String },

    #[error("{field}: invalid default value: {source}")]
    InvalidDefault { field: String, source: CoerceError },

    #[error("{field}: invalid enumerated value: {source}")]
    InvalidEnumValue { field: String, source: CoerceError },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in field declarations")]
    UnknownKeys(Vec<SchemaError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),
}

/// Failure of a [`Prompter`](crate::prompter::Prompter) to show or collect something.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("cannot show title: {0}")]
    ShowTitle(#[source] std::io::Error),

    #[error("cannot write prompt: {0}")]
    WritePrompt(#[source] std::io::Error),

    #[error("cannot read input: {0}")]
    ReadInput(#[source] std::io::Error),

    #[error("cannot read input: unexpected end of input")]
    UnexpectedEof,

    #[error("cannot read input: interrupted")]
    Interrupted,

    /// Free-form failure for prompters that are not backed by I/O.
    #[error("{0}")]
    Failed(String),
}

/// Why a single field could not be collected.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("cannot get input: {0}")]
    GetInput(#[source] PromptError),

    #[error("too many invalid inputs")]
    TooManyInvalidInputs,

    #[error("unsupported attribute type \"{field_type}\"")]
    UnsupportedType { field: String, field_type: FieldType },
}

/// Errors returned by [`PromptingFiller::fill`](crate::form::PromptingFiller::fill).
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    ShowTitle(PromptError),

    #[error("cannot complete form: {0}")]
    Incomplete(#[source] FieldError),
}
