//! Interactive form filling.
//!
//! [`PromptingFiller`] walks a [`Form`]'s fields in presentation order
//! (see [`Fields::sorted`]), asks a [`Prompter`] for each value and coerces
//! the answer to the field's type:
//!
//! ```text
//! check types -> show title? -> for each field:
//!     prompt -> coerce -> ok: next field
//!                      -> invalid: report, retry (up to max_tries)
//! ```
//!
//! Any failure aborts the whole fill; no partial result is returned.

use std::cmp::Ordering;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::checker::{self, Checker};
use crate::error::{FieldError, FormError, SchemaError};
use crate::prompter::Prompter;
use crate::settings::FillerSettings;
use crate::types::{Attr, FieldType, Fields, Form, NamedAttr};

/// Attempts per field when none is configured.
pub const DEFAULT_MAX_TRIES: usize = 3;

impl Fields {
    /// The fields in presentation order.
    ///
    /// Sorted by group, then non-secret before secret, then description.
    /// Fields that tie on all three keep name order.
    pub fn sorted(&self) -> Vec<NamedAttr<'_>> {
        let mut fields: Vec<NamedAttr<'_>> = self
            .iter()
            .map(|(name, attr)| NamedAttr { name, attr })
            .collect();
        fields.sort_by(|a, b| presentation_order(a.attr, b.attr));
        fields
    }
}

fn presentation_order(a: &Attr, b: &Attr) -> Ordering {
    a.group
        .cmp(&b.group)
        .then(a.secret.cmp(&b.secret))
        .then_with(|| a.description.cmp(&b.description))
}

/// Something that can produce values for every field of a form.
pub trait Filler {
    fn fill(&mut self, form: &Form) -> Result<Table, FormError>;
}

/// Fills a form by prompting for each field in turn.
pub struct PromptingFiller<P> {
    prompter: P,
    max_tries: usize,
}

impl<P: Prompter> PromptingFiller<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    /// Take the attempt limit from loaded settings.
    pub fn from_settings(prompter: P, settings: &FillerSettings) -> Self {
        Self::new(prompter).max_tries(settings.max_tries)
    }

    /// Attempts per field before giving up. `0` means [`DEFAULT_MAX_TRIES`].
    pub fn max_tries(mut self, tries: usize) -> Self {
        self.max_tries = if tries == 0 { DEFAULT_MAX_TRIES } else { tries };
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Prompt for every field of `form` and return the coerced values.
    ///
    /// Field types are checked before anything is shown, so an unknown or
    /// unsupported type fails without any interaction.
    pub fn fill(&mut self, form: &Form) -> Result<Table, FormError> {
        let fields = form
            .fields
            .sorted()
            .into_iter()
            .map(|field| response_checker(field).map(|checker| (field, checker)))
            .collect::<Result<Vec<_>, FormError>>()?;

        if let Some(title) = form.title.as_deref().filter(|t| !t.is_empty()) {
            self.prompter
                .show_title(title)
                .map_err(FormError::ShowTitle)?;
        }

        let mut values = Table::new();
        for (field, checker) in fields {
            let value = self
                .prompt(field, checker.as_ref())
                .map_err(FormError::Incomplete)?;
            values.insert(field.name.to_string(), value);
        }
        debug!(fields = values.len(), "form complete");
        Ok(values)
    }

    fn prompt(&mut self, field: NamedAttr<'_>, checker: &dyn Checker) -> Result<Value, FieldError> {
        for attempt in 1..=self.max_tries {
            debug!(field = field.name, attempt, "prompting for field");
            let raw = self
                .prompter
                .prompt(field.name, field.attr)
                .map_err(FieldError::GetInput)?;
            match checker.coerce(&raw, "") {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if field.attr.secret {
                        warn!(field = field.name, attempt, "invalid input");
                    } else {
                        warn!(field = field.name, attempt, error = %err, "invalid input");
                    }
                    self.prompter
                        .report_invalid(field.name, field.attr, &err)
                        .map_err(FieldError::GetInput)?;
                }
            }
        }
        Err(FieldError::TooManyInvalidInputs)
    }
}

impl<P: Prompter> Filler for PromptingFiller<P> {
    fn fill(&mut self, form: &Form) -> Result<Table, FormError> {
        PromptingFiller::fill(self, form)
    }
}

/// The checker used for prompt responses. Integers are parsed strictly,
/// unlike the schema compiler's number coercion.
fn response_checker(field: NamedAttr<'_>) -> Result<Box<dyn Checker>, FormError> {
    match &field.attr.field_type {
        FieldType::String => Ok(Box::new(checker::string())),
        FieldType::Bool => Ok(Box::new(checker::bool())),
        FieldType::Int => Ok(Box::new(checker::int())),
        FieldType::Attrs => Err(FormError::Incomplete(FieldError::UnsupportedType {
            field: field.name.to_string(),
            field_type: FieldType::Attrs,
        })),
        FieldType::Other(name) => Err(FormError::Schema(SchemaError::InvalidType {
            field: field.name.to_string(),
            type_name: name.clone(),
        })),
    }
}
