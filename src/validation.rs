//! Field-level validation
//!
//! Two producers feed these types: payload checks on create/update bodies
//! (through [`Validatable`]) and the strict search-query parser, which turns
//! every value the permissive parser would silently drop into a
//! [`ValidationError`] naming the query parameter.
//!
//! ```rust,ignore
//! use immocrate::validation::{Validatable, ValidationErrors, ValidationError};
//!
//! impl Validatable for CreateProperty {
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         let mut errors = ValidationErrors::new();
//!         if self.title.trim().is_empty() {
//!             errors.add(ValidationError::new("title", "Title is required"));
//!         }
//!         errors.result()
//!     }
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Validation error with field name and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field (or query parameter) that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Shorthand for `add(ValidationError::new(field, message))`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.add(ValidationError::new(field, message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Names of the offending fields, in insertion order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Convert to Result
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by request payloads that carry invariants the type system
/// does not express (non-empty strings, non-negative amounts).
pub trait Validatable {
    /// # Errors
    ///
    /// Returns every violated rule, not just the first one.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_is_ok() {
        assert!(ValidationErrors::new().result().is_ok());
    }

    #[test]
    fn test_collects_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push("price", "must not be negative");
        errors.push("title", "is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["price", "title"]);
        let err = errors.result().unwrap_err();
        assert!(err.to_string().contains("2 error(s)"));
        assert!(err.to_string().contains("price: must not be negative"));
    }
}
