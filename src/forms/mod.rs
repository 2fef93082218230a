//! HTML form payloads and their validation.
//!
//! Each form is deserialized as raw strings, validated with `validator`, and
//! then converted into a typed payload. Validation runs to completion before
//! anything reaches the repository; every failure is reported per field.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod categories;
pub mod pages;

/// Validation messages keyed by form field, rendered next to the inputs.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors map holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Collects the outcome of a typed constructor into the map.
    pub(crate) fn check<T>(&mut self, result: Result<T, TypeConstraintError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(e.field(), e.to_string());
                None
            }
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, field_errors) in value.field_errors() {
            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => error.to_string(),
                };
                errors.add(&field.to_string(), message);
            }
        }
        errors
    }
}

impl From<TypeConstraintError> for FieldErrors {
    fn from(value: TypeConstraintError) -> Self {
        FieldErrors::single(value.field(), value.to_string())
    }
}

/// A submitted form was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("form validation failed: {0}")]
pub struct FormError(pub FieldErrors);

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self(value.into())
    }
}

impl From<FieldErrors> for FormError {
    fn from(value: FieldErrors) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.add("url", "bad url");
        errors.add("name", "required");
        errors.add("name", "too long");
        assert_eq!(
            errors.to_string(),
            "name: required; name: too long; url: bad url"
        );
    }

    #[test]
    fn type_constraint_errors_land_on_their_field() {
        let errors = FieldErrors::from(TypeConstraintError::InvalidUrl("url"));
        assert_eq!(errors.get("url"), ["url must be a valid URL".to_string()]);
        assert!(errors.get("title").is_empty());
    }
}
