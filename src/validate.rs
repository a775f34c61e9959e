//! Strict-mode validation: detect unknown attribute keys in TOML declarations.
//!
//! Uses `serde_ignored` while deserializing into [`Fields`] and reports every
//! key that no [`Attr`](crate::types::Attr) field consumed, with its file path
//! and best-effort line number. A misspelt `mandatry = true` would otherwise
//! be silently dropped.

use std::path::Path;

use crate::error::SchemaError;
use crate::types::Fields;

/// Fail if `content` declares keys that are not attribute properties.
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), SchemaError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _fields: Fields = serde_ignored::deserialize(deserializer, |ignored| {
        unknown_keys.push(ignored.to_string());
    })
    .map_err(|e| SchemaError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors = unknown_keys
        .into_iter()
        .map(|key| SchemaError::UnknownKey {
            line: find_key_line(content, &key),
            key,
            path: path.to_path_buf(),
        })
        .collect();
    Err(SchemaError::UnknownKeys(errors))
}

/// 1-indexed line of `field.key` in TOML text, or 0 if it cannot be found.
///
/// Only handles `[field]` headers (bare or quoted) followed by `key = ...`
/// lines. Keys inside inline tables are not located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let (field, leaf) = dotted_key.rsplit_once('.').unwrap_or(("", dotted_key));
    let mut current = String::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(header) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            current = unquote(header.trim()).to_string();
            continue;
        }
        if current == field && assigns(trimmed, leaf) {
            return i + 1;
        }
    }
    0
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

fn assigns(line: &str, key: &str) -> bool {
    let Some(rest) = line.split_once('=').map(|(lhs, _)| lhs.trim()) else {
        return false;
    };
    unquote(rest) == key
}
