//! Schema compiler: turn [`Fields`] into per-field checkers and defaults.
//!
//! [`Fields::validation_schema`] resolves one [`Checker`] per field and a
//! [`FieldDefault`] directive for every field that may be absent. [`FieldMap`]
//! applies the pair to a map of raw values.
//!
//! Declared defaults are coerced at compile time and injected by
//! [`FieldMap`] when the field is absent. A declared default is checked
//! against the type only, never against `values`.

use std::collections::BTreeMap;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::checker::{Checker, checker_for, describe};
use crate::error::{CoerceError, SchemaError};
use crate::one_of::OneOf;
use crate::types::{Attr, Fields};

/// What to do when a field is absent from the value map.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// Leave it out of the result.
    Omit,
    /// Insert this (already coerced) value.
    Value(Value),
}

/// Checker per field name.
pub type Checkers = BTreeMap<String, Box<dyn Checker>>;

/// Absence directive per field name. Mandatory fields without a declared
/// default have no entry.
pub type Defaults = BTreeMap<String, FieldDefault>;

impl Fields {
    /// Compile the declarations into checkers and defaults.
    ///
    /// Fields are visited in name order; the first invalid one stops
    /// compilation.
    pub fn validation_schema(&self) -> Result<(Checkers, Defaults), SchemaError> {
        debug!(fields = self.len(), "compiling validation schema");
        let mut checkers = Checkers::new();
        let mut defaults = Defaults::new();

        for (name, attr) in self {
            let Some(base) = checker_for(&attr.field_type) else {
                warn!(field = %name, field_type = %attr.field_type, "invalid field type");
                return Err(SchemaError::InvalidType {
                    field: name.clone(),
                    type_name: attr.field_type.to_string(),
                });
            };

            let checker: Box<dyn Checker> = match &attr.values {
                Some(values) if !values.is_empty() => {
                    let one_of = OneOf::new(base, values).map_err(|source| {
                        SchemaError::InvalidEnumValue {
                            field: name.clone(),
                            source,
                        }
                    })?;
                    insert_default(&mut defaults, name, attr, one_of.inner())?;
                    Box::new(one_of)
                }
                _ => {
                    insert_default(&mut defaults, name, attr, base.as_ref())?;
                    base
                }
            };
            checkers.insert(name.clone(), checker);
        }

        debug!(checkers = checkers.len(), "validation schema compiled");
        Ok((checkers, defaults))
    }

    /// Compile straight into a [`FieldMap`].
    pub fn field_map(&self) -> Result<FieldMap, SchemaError> {
        let (checkers, defaults) = self.validation_schema()?;
        Ok(FieldMap::new(checkers, defaults))
    }
}

/// Record the absence directive for `name`. A declared default is coerced
/// with the type checker alone.
fn insert_default(
    defaults: &mut Defaults,
    name: &str,
    attr: &Attr,
    base: &dyn Checker,
) -> Result<(), SchemaError> {
    if let Some(raw) = &attr.default {
        let value = base
            .coerce(raw, "")
            .map_err(|source| SchemaError::InvalidDefault {
                field: name.to_string(),
                source,
            })?;
        defaults.insert(name.to_string(), FieldDefault::Value(value));
    } else if !attr.mandatory {
        defaults.insert(name.to_string(), FieldDefault::Omit);
    }
    Ok(())
}

/// Validates a table of raw values against compiled checkers and defaults.
///
/// Keys that have no checker are dropped from the result.
#[derive(Debug)]
pub struct FieldMap {
    checkers: Checkers,
    defaults: Defaults,
}

impl FieldMap {
    pub fn new(checkers: Checkers, defaults: Defaults) -> Self {
        Self { checkers, defaults }
    }

    /// Coerce every declared field of `values`, filling in defaults.
    pub fn validate(&self, values: &Table) -> Result<Table, CoerceError> {
        self.validate_at(values, "")
    }

    fn validate_at(&self, values: &Table, path: &str) -> Result<Table, CoerceError> {
        let mut out = Table::new();
        for (name, checker) in &self.checkers {
            let field_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            match values.get(name) {
                Some(raw) => {
                    out.insert(name.clone(), checker.coerce(raw, &field_path)?);
                }
                None => match self.defaults.get(name) {
                    Some(FieldDefault::Omit) => {}
                    Some(FieldDefault::Value(v)) => {
                        out.insert(name.clone(), v.clone());
                    }
                    None => {
                        return Err(CoerceError::Missing {
                            path: field_path,
                            expected: checker.expected(),
                        });
                    }
                },
            }
        }
        Ok(out)
    }
}

impl Checker for FieldMap {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        match value {
            Value::Table(table) => self.validate_at(table, path).map(Value::Table),
            other => Err(CoerceError::Expected {
                path: path.to_string(),
                expected: "map",
                got: describe(other),
            }),
        }
    }

    fn expected(&self) -> &'static str {
        "map"
    }
}
