//! Field-level input checks.
//!
//! Every failing field is collected so the caller can report all of them at once.

use std::fmt;

use crate::errors::ModelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulator for field errors, rendered as `field: message, field: message`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    /// Non-blank text of at most `max` characters. Returns the value when it passed.
    pub fn text(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
        required: &str,
        too_long: &str,
    ) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => {
                if v.chars().count() > max {
                    self.push(field, too_long);
                    None
                } else {
                    Some(v)
                }
            }
            _ => {
                self.push(field, required);
                None
            }
        }
    }

    pub fn id(&mut self, field: &'static str, value: Option<u64>, required: &str) -> Option<u64> {
        if value.is_none() {
            self.push(field, required);
        }
        value
    }

    pub fn into_result(self) -> Result<(), ModelError> {
        if self.is_empty() { Ok(()) } else { Err(ModelError::Validation(self)) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
