//! Enumeration constraint: restrict a checker's output to a fixed set.

use toml::Value;

use crate::checker::Checker;
use crate::error::CoerceError;

/// Wraps a checker so the coerced value must equal one of `candidates`.
///
/// Candidates are coerced once, at construction, with the wrapped checker,
/// so `"20"` and `20` are the same candidate for an integer field.
#[derive(Debug)]
pub struct OneOf {
    checker: Box<dyn Checker>,
    candidates: Vec<Value>,
}

impl OneOf {
    /// Coerce every raw candidate and build the constraint.
    ///
    /// Fails with the first candidate the checker rejects.
    pub fn new(checker: Box<dyn Checker>, raw: &[Value]) -> Result<Self, CoerceError> {
        let candidates = raw
            .iter()
            .map(|v| checker.coerce(v, ""))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            checker,
            candidates,
        })
    }

    pub fn candidates(&self) -> &[Value] {
        &self.candidates
    }

    /// The wrapped checker, without the enumeration constraint.
    pub fn inner(&self) -> &dyn Checker {
        self.checker.as_ref()
    }
}

impl Checker for OneOf {
    fn coerce(&self, value: &Value, path: &str) -> Result<Value, CoerceError> {
        let coerced = self.checker.coerce(value, path)?;
        if self.candidates.contains(&coerced) {
            return Ok(coerced);
        }
        Err(CoerceError::NotOneOf {
            path: path.to_string(),
            candidates: self.candidates.clone(),
            got: coerced,
        })
    }

    fn expected(&self) -> &'static str {
        self.checker.expected()
    }
}
