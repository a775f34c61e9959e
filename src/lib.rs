//! Declarative configuration attributes for Rust applications. Declare the
//! keys once, then validate values against them or ask a human to fill them in.
//!
//! ```ignore
//! let fields = Fields::new()
//!     .with("region", Attr::new(FieldType::String).description("Region").values(["us", "eu"]))
//!     .with("token", Attr::new(FieldType::String).description("Token").secret().mandatory());
//!
//! // (a) validate a map of raw values
//! let config = fields.field_map()?.validate(&raw)?;
//!
//! // (b) or prompt for them at the terminal
//! let answers = PromptingFiller::new(IoPrompter::stdio()).fill(&Form::new(fields))?;
//! ```
//!
//! # Attributes
//!
//! An [`Attr`] describes one configuration key:
//!
//! - **`field_type`**: `string`, `bool`, `int` or `attrs` (a set of
//!   `key=value` pairs). Any other name is kept as [`FieldType::Other`] and
//!   rejected when compiled or filled.
//! - **`default`**: a raw value, coerced and checked when the schema is
//!   compiled.
//! - **`values`**: when set, the coerced value must equal one of these.
//! - **`mandatory`**: the key must be supplied.
//! - **`secret`**: the value is never echoed or printed.
//! - **`env_var` / `env_vars`**: where interactive defaults come from.
//! - **`group`** and **`description`**: presentation only.
//!
//! [`Fields`] maps names to attributes. It can be built in code or loaded
//! from TOML or JSON (see [`load_fields`]) using the external keys
//! `description`, `type`, `group`, `mandatory`, `is-secret`, `env-var`,
//! `env-vars`, `default`, `example` and `values`.
//!
//! # Validation schemas
//!
//! [`Fields::validation_schema`] compiles the declarations into one
//! [`Checker`] per field plus a [`FieldDefault`] directive per field that
//! may be absent. Compilation stops at the first invalid field, and every
//! error names it:
//!
//! ```text
//! port: invalid type "float"
//! port: invalid default value: expected number, got boolean(true)
//! mode: invalid enumerated value: expected string, got integer(3)
//! ```
//!
//! Absent fields are handled as follows:
//!
//! | declared | absent value |
//! |----------|--------------|
//! | `default` set | the coerced default is inserted |
//! | no default, not mandatory | omitted |
//! | no default, mandatory | error (`expected string, got nothing`) |
//!
//! A default is checked against the field's type only, not against
//! `values`.
//!
//! # The `attrs` type
//!
//! Accepts a whitespace-separated string (`"x=y z= foo=bar"`), an array of
//! tokens (`["x=y", "z"]`) or a table of strings, and always produces a
//! string-to-string table. A bare `key` maps to the empty string.
//!
//! # Forms
//!
//! [`PromptingFiller`] asks a [`Prompter`] for every field of a [`Form`]:
//!
//! 1. Field types are checked up front. `attrs` fields cannot be filled
//!    interactively, so a form containing one fails before anything is
//!    shown.
//! 2. The title, if any, is shown.
//! 3. Fields are visited by group, then non-secret before secret, then
//!    description ([`Fields::sorted`]).
//! 4. Each answer is coerced to the field's type. A rejected answer is
//!    reported through the prompter and the field is asked again, up to
//!    `max_tries` times (3 by default, configurable via [`FillerSettings`]).
//!
//! Running out of attempts, or any prompter failure, aborts the whole form
//! with `cannot complete form: ...` and discards the answers collected so
//! far.
//!
//! # Prompters
//!
//! [`IoPrompter`] writes `Description: ` (or `Description (default): `) and
//! reads one line. The default comes from `env_var`, then the first
//! non-empty `env_vars` entry; an empty answer selects it. Secret defaults
//! are shown as `****`, and when reading from a terminal, secret answers are
//! typed with echo off.
//!
//! [`ScriptedPrompter`] replays canned answers and records every prompt,
//! which is what the crate's own tests use.
//!
//! # Logging
//!
//! The crate emits `tracing` events (compilation, each prompt, rejected
//! answers) and installs no subscriber. Secret answers are never logged.
//!
//! # Error handling
//!
//! [`SchemaError`] covers compilation and loading, [`CoerceError`]
//! validation, [`PromptError`] the prompting transport and [`FormError`] a
//! whole fill. See the [`error`] module.

pub mod error;
pub mod types;

mod attrs;
pub mod checker;
mod env;
mod file;
mod form;
mod one_of;
mod prompter;
mod schema;
mod settings;
mod validate;

#[cfg(test)]
mod fixtures;

pub use attrs::AttrsChecker;
pub use checker::Checker;
pub use env::{default_from_env, process_env};
pub use error::{CoerceError, FieldError, FormError, PromptError, SchemaError};
pub use file::load_fields;
pub use form::{DEFAULT_MAX_TRIES, Filler, PromptingFiller};
pub use one_of::OneOf;
pub use prompter::{IoPrompter, Prompter, ScriptedPrompter, SecretReader};
pub use schema::{Checkers, Defaults, FieldDefault, FieldMap};
pub use settings::FillerSettings;
pub use types::{Attr, FieldType, Fields, Form, NamedAttr};
