//! The composite `attrs` type: a set of `key=value` pairs.
//!
//! Three input shapes are accepted and all normalize to a string-to-string
//! table:
//!
//! | input | example |
//! |-------|---------|
//! | string | `"x=y z= foo=bar"` |
//! | array of strings | `["x=y", "z", "foo=bar"]` |
//! | table of strings | `{ x = "y", z = "" }` |
//!
//! A bare token (`z`) maps to the empty string. When a key repeats, the last
//! occurrence wins.

use toml::{Table, Value};

use crate::checker::{Checker, describe, expected};
use crate::error::CoerceError;

#[derive(Debug, Clone, Copy, Default)]
pub struct AttrsChecker;

impl Checker for AttrsChecker {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        let mut out = Table::new();
        match value {
            Value::String(s) => {
                for token in s.split_whitespace() {
                    insert_token(&mut out, token, path)?;
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let Value::String(token) = item else {
                        return Err(expected(&format!("{path}[{i}]"), "string", item));
                    };
                    insert_token(&mut out, token, path)?;
                }
            }
            Value::Table(table) => {
                for (key, v) in table {
                    let Value::String(s) = v else {
                        return Err(expected(&format!("{path}.{key}"), "string", v));
                    };
                    out.insert(key.clone(), Value::String(s.clone()));
                }
            }
            other => {
                return Err(CoerceError::Expected {
                    path: path.to_string(),
                    expected: "string, array or map",
                    got: describe(other),
                });
            }
        }
        Ok(Value::Table(out))
    }

    fn expected(&self) -> &'static str {
        "attrs"
    }
}

fn insert_token(out: &mut Table, token: &str, path: &str) -> Result<(), CoerceError> {
    let (key, value) = token.split_once('=').unwrap_or((token, ""));
    if key.is_empty() {
        return Err(CoerceError::Parse {
            path: path.to_string(),
            reason: format!("empty key in {token:?}"),
        });
    }
    out.insert(key.to_string(), Value::String(value.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.into())
    }

    fn expected_table() -> Value {
        let mut t = Table::new();
        t.insert("x".into(), s("y"));
        t.insert("z".into(), s(""));
        t.insert("foo".into(), s("bar"));
        Value::Table(t)
    }

    #[test]
    fn whitespace_joined_string() {
        let got = AttrsChecker.coerce(&s("x=y z= foo=bar"), "labels").unwrap();
        assert_eq!(got, expected_table());
    }

    #[test]
    fn sequence_of_tokens() {
        let input = Value::Array(vec![s("x=y"), s("z"), s("foo=bar")]);
        let got = AttrsChecker.coerce(&input, "labels").unwrap();
        assert_eq!(got, expected_table());
    }

    #[test]
    fn map_passes_through() {
        let got = AttrsChecker.coerce(&expected_table(), "labels").unwrap();
        assert_eq!(got, expected_table());
    }

    #[test]
    fn value_may_contain_equals() {
        let got = AttrsChecker.coerce(&s("q=a=b"), "").unwrap();
        assert_eq!(got.as_table().unwrap()["q"].as_str(), Some("a=b"));
    }

    #[test]
    fn last_duplicate_wins() {
        let got = AttrsChecker.coerce(&s("x=1 x=2"), "").unwrap();
        assert_eq!(got.as_table().unwrap()["x"].as_str(), Some("2"));
    }

    #[test]
    fn empty_string_is_empty_map() {
        let got = AttrsChecker.coerce(&s("   "), "").unwrap();
        assert!(got.as_table().unwrap().is_empty());
    }

    #[test]
    fn empty_key_is_parse_error() {
        let err = AttrsChecker.coerce(&s("a=b =c"), "labels").unwrap_err();
        assert_eq!(err.to_string(), "labels: empty key in \"=c\"");
    }

    #[test]
    fn non_string_sequence_element() {
        let input = Value::Array(vec![s("x=y"), Value::Integer(1)]);
        let err = AttrsChecker.coerce(&input, "labels").unwrap_err();
        assert_eq!(err.to_string(), "labels[1]: expected string, got integer(1)");
    }

    #[test]
    fn non_string_map_value() {
        let mut t = Table::new();
        t.insert("x".into(), Value::Boolean(true));
        let err = AttrsChecker.coerce(&Value::Table(t), "labels").unwrap_err();
        assert_eq!(err.to_string(), "labels.x: expected string, got boolean(true)");
    }

    #[test]
    fn other_shape_is_type_error() {
        let err = AttrsChecker.coerce(&Value::Integer(5), "labels").unwrap_err();
        assert_eq!(
            err.to_string(),
            "labels: expected string, array or map, got integer(5)"
        );
    }
}
