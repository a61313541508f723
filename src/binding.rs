//! Event semantics for a bound form. Platform glue registers listeners and
//! forwards each event here; this type decides what the page should do.

use crate::{
    config::ValidationConfig,
    controls::{Control, ErrorContainer, FormHandle},
    validation::{Form, ValidationResult, Validator},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Value changed on the field at this document-order index.
    Input(usize),
    /// Field at this index lost focus.
    Blur(usize),
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    /// Prevent the default submit and stop other submit listeners.
    CancelSubmit,
}

#[derive(Debug)]
pub struct FormBinding<F, C, E> {
    validator: Validator,
    form: Form<F, C, E>,
}

impl<F, C, E> FormBinding<F, C, E>
where
    F: FormHandle,
    C: Control,
    E: ErrorContainer,
{
    #[must_use]
    pub fn new(config: &ValidationConfig, form: Form<F, C, E>) -> Self {
        Self::with_validator(Validator::new(config), form)
    }

    #[must_use]
    pub fn with_validator(validator: Validator, form: Form<F, C, E>) -> Self {
        Self { validator, form }
    }

    pub fn form(&self) -> &Form<F, C, E> {
        &self.form
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn handle(&self, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Input(index) | FormEvent::Blur(index) => {
                self.validate_field(index);
                EventOutcome::Continue
            }
            FormEvent::Submit => {
                if self.validator.validate_form(&self.form) {
                    EventOutcome::Continue
                } else {
                    EventOutcome::CancelSubmit
                }
            }
        }
    }

    /// Validates one field; `None` when the index is out of range.
    pub fn validate_field(&self, index: usize) -> Option<ValidationResult> {
        self.form
            .field(index)
            .map(|field| self.validator.validate_field(field))
    }
}
