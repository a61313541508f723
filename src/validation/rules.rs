use super::{Field, FieldKind, ValidationError, ValidationResult};
use crate::config::ValidationConfig;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// A single stateless check. Rules only look at the field they are given.
pub trait Rule {
    fn evaluate(&self, field: &Field<'_>) -> ValidationResult;
}

/// Required fields must hold something other than whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct Required;

impl Rule for Required {
    fn evaluate(&self, field: &Field<'_>) -> ValidationResult {
        if field.is_required() && field.trimmed_value().is_empty() {
            return ValidationError::MissingRequiredValue.into();
        }
        ValidationResult::Valid
    }
}

/// Loose `local@domain.tld` shape check for email fields.
#[derive(Debug, Clone)]
pub struct EmailShape {
    pattern: Option<Regex>,
}

impl Default for EmailShape {
    fn default() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).ok(),
        }
    }
}

impl EmailShape {
    #[must_use]
    pub fn is_email(&self, value: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(value))
    }
}

impl Rule for EmailShape {
    fn evaluate(&self, field: &Field<'_>) -> ValidationResult {
        let value = field.trimmed_value();
        if field.kind() == FieldKind::Email && !value.is_empty() && !self.is_email(value) {
            return ValidationError::MalformedEmail.into();
        }
        ValidationResult::Valid
    }
}

/// Minimum length for fields whose name mentions `password`. Length is
/// counted in UTF-16 code units, matching the browser's `minlength`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordLength {
    min: usize,
}

impl PasswordLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Rule for PasswordLength {
    fn evaluate(&self, field: &Field<'_>) -> ValidationResult {
        let value = field.trimmed_value();
        if field.name_contains("password")
            && !value.is_empty()
            && value.encode_utf16().count() < self.min
        {
            return ValidationError::PasswordTooShort { min: self.min }.into();
        }
        ValidationResult::Valid
    }
}

/// Ordered rules; the first invalid result wins and stops evaluation.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Required, then email shape, then password length.
    #[must_use]
    pub fn standard(config: &ValidationConfig) -> Self {
        Self::new()
            .with_rule(Required)
            .with_rule(EmailShape::default())
            .with_rule(PasswordLength::new(config.min_password_length))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn evaluate(&self, field: &Field<'_>) -> ValidationResult {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(field))
            .find(|result| !result.is_valid())
            .unwrap_or(ValidationResult::Valid)
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> RuleSet {
        RuleSet::standard(&ValidationConfig::default())
    }

    fn check(name: &str, input_type: &str, value: &str, required: bool) -> ValidationResult {
        standard().evaluate(&Field::new(name, input_type, value, required))
    }

    #[test]
    fn required_empty_or_whitespace_fails_for_every_kind() {
        for (name, input_type) in [
            ("name", "text"),
            ("email", "email"),
            ("password", "password"),
            ("bio", "textarea"),
        ] {
            for value in ["", "   ", "\t\n", "\u{feff}"] {
                assert_eq!(
                    check(name, input_type, value, true),
                    ValidationResult::Invalid(ValidationError::MissingRequiredValue),
                    "{name} with {value:?}"
                );
            }
        }
    }

    #[test]
    fn email_shape() {
        assert!(check("email", "email", "a@b.co", false).is_valid());
        assert!(check("email", "email", "  a@b.co  ", true).is_valid());
        assert_eq!(
            check("email", "email", "not-an-email", false),
            ValidationResult::Invalid(ValidationError::MalformedEmail)
        );
        assert_eq!(
            check("contact", "email", "a@b", false),
            ValidationResult::Invalid(ValidationError::MalformedEmail)
        );
        assert_eq!(
            check("email", "email", "a b@c.d", false),
            ValidationResult::Invalid(ValidationError::MalformedEmail)
        );
        assert!(check("email", "email", "", false).is_valid());
    }

    #[test]
    fn email_kind_from_name_only() {
        assert_eq!(
            check("backup_email", "text", "nope", false),
            ValidationResult::Invalid(ValidationError::MalformedEmail)
        );
    }

    #[test]
    fn password_length_boundary() {
        assert_eq!(
            check("password", "password", "1234567", false),
            ValidationResult::Invalid(ValidationError::PasswordTooShort { min: 8 })
        );
        assert!(check("password", "password", "12345678", false).is_valid());
        assert!(check("password", "password", "", false).is_valid());
    }

    #[test]
    fn password_length_counts_utf16_units() {
        // Two-byte chars are one unit each.
        assert!(!check("password", "password", "ñññññññ", false).is_valid());
        assert!(check("password", "password", "ññññññññ", false).is_valid());
        // Astral chars are two units each.
        assert!(check("password", "password", "😀😀😀😀", false).is_valid());
        assert!(!check("password", "password", "😀😀😀", false).is_valid());
    }

    #[test]
    fn password_rule_keys_on_name() {
        assert!(check("pin", "password", "123", false).is_valid());
        assert!(!check("confirm_password", "text", "123", false).is_valid());
    }

    #[test]
    fn required_wins_over_shape_rules() {
        assert_eq!(
            check("email", "email", " ", true),
            ValidationResult::Invalid(ValidationError::MissingRequiredValue)
        );
    }

    #[test]
    fn configured_minimum_is_reported() {
        let config = ValidationConfig {
            min_password_length: 12,
            ..ValidationConfig::default()
        };
        let rules = RuleSet::standard(&config);
        let result = rules.evaluate(&Field::new("password", "password", "elevenchars", false));
        assert_eq!(
            result.message().as_deref(),
            Some("Password must be at least 12 characters.")
        );
    }

    #[test]
    fn empty_rule_set_accepts_everything() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(rules.evaluate(&Field::new("email", "email", "", true)).is_valid());
        assert_eq!(standard().len(), 3);
    }
}
