//! Field rules and the form-level validation pass.
//!
//! Outcomes are plain values: an invalid field is a [`ValidationResult::Invalid`],
//! never an `Err`. The `Display` of [`ValidationError`] is the exact text shown
//! to the user, so it must stay literal English and free of field values.

mod engine;
mod field;
mod rules;

pub use engine::{BoundField, Form, Validator};
pub use field::{Field, FieldKind};
pub use rules::{EmailShape, PasswordLength, Required, Rule, RuleSet};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    MissingRequiredValue,
    #[error("Please enter a valid email address.")]
    MalformedEmail,
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },
}

/// Outcome of checking a single field. Recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }

    /// User-facing message, `None` when valid.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_literal() {
        assert_eq!(
            ValidationError::MissingRequiredValue.to_string(),
            "This field is required."
        );
        assert_eq!(
            ValidationError::MalformedEmail.to_string(),
            "Please enter a valid email address."
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters."
        );
    }

    #[test]
    fn result_accessors() {
        assert!(ValidationResult::Valid.is_valid());
        assert_eq!(ValidationResult::Valid.message(), None);

        let result = ValidationResult::from(ValidationError::MalformedEmail);
        assert!(!result.is_valid());
        assert_eq!(result.error(), Some(&ValidationError::MalformedEmail));
        assert_eq!(
            result.message().as_deref(),
            Some("Please enter a valid email address.")
        );
    }
}
