//! The declarative attribute model.
//!
//! Nothing here has behavior beyond construction and serialization. The
//! schema compiler ([`Fields::validation_schema`]) and the form engine
//! ([`PromptingFiller`](crate::form::PromptingFiller)) consume these types.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};
use toml::Value;

/// The declared type of an attribute value.
///
/// Unknown names are kept as [`FieldType::Other`] so that declarations
/// still deserialize and the compiler can report them with the field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    String,
    Bool,
    Int,
    /// A set of `key=value` pairs, coerced to a string-to-string map.
    Attrs,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Attrs => "attrs",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => FieldType::String,
            "bool" => FieldType::Bool,
            "int" => FieldType::Int,
            "attrs" => FieldType::Attrs,
            _ => FieldType::Other(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        FieldType::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Declaration of one configuration attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attr {
    /// Human-readable label, used as the prompt text.
    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Presentation group. Only affects ordering.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// The attribute must be supplied; the compiler never marks it omissible.
    #[serde(default, skip_serializing_if = "is_false")]
    pub mandatory: bool,

    /// The value is never echoed or printed in clear text.
    #[serde(rename = "is-secret", default, skip_serializing_if = "is_false")]
    pub secret: bool,

    /// Environment variable consulted first for an interactive default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_var: Option<String>,

    /// Fallback environment variables, consulted in order after `env_var`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Illustrative value. Never used for defaulting or validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// When set, the coerced value must equal one of these (after coercion).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

impl Attr {
    pub fn new(field_type: impl Into<FieldType>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn env_var(mut self, name: &str) -> Self {
        self.env_var = Some(name.to_string());
        self
    }

    /// Append a fallback environment variable.
    pub fn fallback_env_var(mut self, name: &str) -> Self {
        self.env_vars.push(name.to_string());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn values<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Attribute declarations keyed by name.
///
/// Backed by a `BTreeMap`, so plain iteration is by name. Presentation order
/// comes from [`Fields::sorted`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Attr>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, returning the one it replaced.
    pub fn insert(&mut self, name: &str, attr: Attr) -> Option<Attr> {
        self.0.insert(name.to_string(), attr)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, attr: Attr) -> Self {
        self.insert(name, attr);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Attr> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Attr)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Attr)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Attr);
    type IntoIter = btree_map::Iter<'a, String, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A set of fields to fill in, with an optional title shown first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub title: Option<String>,
    pub fields: Fields,
}

impl Form {
    pub fn new(fields: Fields) -> Self {
        Self {
            title: None,
            fields,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// A field name paired with its declaration, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedAttr<'a> {
    pub name: &'a str,
    pub attr: &'a Attr,
}
