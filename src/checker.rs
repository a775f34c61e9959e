//! Primitive coercion checkers.
//!
//! A [`Checker`] validates a raw [`toml::Value`] and converts it into its
//! typed form. The schema compiler picks one per declared [`FieldType`] via
//! [`checker_for`]; the form engine uses [`string`], [`bool`] and [`int`]
//! directly on prompt responses.

use std::fmt;

use toml::Value;

use crate::attrs::AttrsChecker;
use crate::error::CoerceError;
use crate::types::FieldType;

/// Coerces a raw value into a typed one, or rejects it.
///
/// `path` names the value in error messages (`"<path>: ..."`). An empty path
/// produces unprefixed messages.
pub trait Checker: fmt::Debug + Send + Sync {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError>;

    /// Short name of the accepted kind, used in "got nothing" errors.
    fn expected(&self) -> &'static str;
}

/// Resolve the checker the schema compiler uses for `field_type`.
///
/// Returns `None` for [`FieldType::Other`].
pub fn checker_for(field_type: &FieldType) -> Option<Box<dyn Checker>> {
    match field_type {
        FieldType::String => Some(Box::new(string())),
        FieldType::Bool => Some(Box::new(bool())),
        FieldType::Int => Some(Box::new(force_int())),
        FieldType::Attrs => Some(Box::new(AttrsChecker)),
        FieldType::Other(_) => None,
    }
}

/// Accepts strings only.
pub fn string() -> StringChecker {
    StringChecker
}

/// Accepts booleans and the usual textual spellings of them.
pub fn bool() -> BoolChecker {
    BoolChecker
}

/// Accepts integers and strings holding an integer.
pub fn int() -> IntChecker {
    IntChecker
}

/// Accepts any number (floats are truncated) or a string holding one.
pub fn force_int() -> ForceIntChecker {
    ForceIntChecker
}

#[derive(Debug, Clone, Copy)]
pub struct StringChecker;

impl Checker for StringChecker {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(expected(path, "string", other)),
        }
    }

    fn expected(&self) -> &'static str {
        "string"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoolChecker;

impl Checker for BoolChecker {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        match value {
            Value::Boolean(_) => Ok(value.clone()),
            Value::String(s) => match s.as_str() {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Boolean(true)),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Boolean(false)),
                _ => Err(expected(path, "bool", value)),
            },
            other => Err(expected(path, "bool", other)),
        }
    }

    fn expected(&self) -> &'static str {
        "bool"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntChecker;

impl Checker for IntChecker {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        match value {
            Value::Integer(_) => Ok(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| expected(path, "int", value)),
            other => Err(expected(path, "int", other)),
        }
    }

    fn expected(&self) -> &'static str {
        "int"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForceIntChecker;

impl Checker for ForceIntChecker {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        match value {
            Value::Integer(_) => Ok(value.clone()),
            Value::Float(f) if f.is_finite() => Ok(Value::Integer(f.trunc() as i64)),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(Value::Integer(i));
                }
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(Value::Integer(f.trunc() as i64)),
                    _ => Err(expected(path, "number", value)),
                }
            }
            other => Err(expected(path, "number", other)),
        }
    }

    fn expected(&self) -> &'static str {
        "number"
    }
}

pub(crate) fn expected(path: &str, kind: &'static str, got: &Value) -> CoerceError {
    CoerceError::Expected {
        path: path.to_string(),
        expected: kind,
        got: describe(got),
    }
}

/// `"<path>: "`, or nothing for an empty path.
pub(crate) fn path_prefix(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{path}: ")
    }
}

/// Render a value without quoting: `wrong`, `20`, `true`.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value with its kind: `integer(123)`, `string("x")`.
pub(crate) fn describe(value: &Value) -> String {
    let shown = match value {
        Value::String(s) => format!("{s:?}"),
        other => other.to_string(),
    };
    format!("{}({shown})", value.type_str())
}
