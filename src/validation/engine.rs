use super::{Field, RuleSet, ValidationResult};
use crate::{
    config::ValidationConfig,
    controls::{Control, ErrorContainer, FormHandle},
    render::Annotator,
};

/// A control paired with the error container of its `form-group`, resolved
/// once when the form is bound. `None` means the control sits outside any
/// group and is never annotated.
#[derive(Clone, Debug)]
pub struct BoundField<C, E> {
    control: C,
    group: Option<E>,
}

impl<C, E> BoundField<C, E> {
    pub fn new(control: C, group: Option<E>) -> Self {
        Self { control, group }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn group(&self) -> Option<&E> {
        self.group.as_ref()
    }
}

/// Fields in document order plus the form element.
#[derive(Clone, Debug)]
pub struct Form<F, C, E> {
    handle: F,
    fields: Vec<BoundField<C, E>>,
}

impl<F, C, E> Form<F, C, E> {
    pub fn new(handle: F, fields: Vec<BoundField<C, E>>) -> Self {
        Self { handle, fields }
    }

    pub fn handle(&self) -> &F {
        &self.handle
    }

    pub fn fields(&self) -> &[BoundField<C, E>] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&BoundField<C, E>> {
        self.fields.get(index)
    }
}

#[derive(Debug)]
pub struct Validator {
    rules: RuleSet,
    annotator: Annotator,
}

impl Validator {
    /// Standard rules and annotation classes from `config`.
    #[must_use]
    pub fn new(config: &ValidationConfig) -> Self {
        Self::with_rules(RuleSet::standard(config), Annotator::new(config))
    }

    #[must_use]
    pub fn with_rules(rules: RuleSet, annotator: Annotator) -> Self {
        Self { rules, annotator }
    }

    /// Runs the rules without touching the page.
    pub fn evaluate<C: Control>(&self, control: &C) -> ValidationResult {
        let name = control.name();
        let input_type = control.input_type();
        let value = control.value();

        self.rules.evaluate(&Field::new(
            &name,
            &input_type,
            &value,
            control.is_required(),
        ))
    }

    /// Runs the rules and renders or clears the field's annotation.
    pub fn validate_field<C: Control, E: ErrorContainer>(
        &self,
        field: &BoundField<C, E>,
    ) -> ValidationResult {
        let result = self.evaluate(field.control());

        match result.error() {
            Some(err) => self.annotator.show_error(field, &err.to_string()),
            None => self.annotator.clear_error_for(field),
        }

        result
    }

    /// Validates every enabled field in document order. When any fails, the
    /// first invalid field takes focus and the native validity UI is shown.
    pub fn validate_form<F: FormHandle, C: Control, E: ErrorContainer>(
        &self,
        form: &Form<F, C, E>,
    ) -> bool {
        let mut first_invalid: Option<&C> = None;

        for field in form.fields().iter().filter(|f| !f.control().is_disabled()) {
            if !self.validate_field(field).is_valid() && first_invalid.is_none() {
                first_invalid = Some(field.control());
            }
        }

        let Some(control) = first_invalid else {
            return true;
        };

        let _ = control.focus();
        let _ = form.handle().report_validity();

        false
    }
}
