//! Inline error annotations. Each group shows at most one message: showing an
//! error clears the container before appending, so repeated passes replace
//! rather than stack.

use crate::{
    config::ValidationConfig,
    controls::{Control, ErrorContainer},
    validation::BoundField,
};

#[derive(Clone, Debug)]
pub struct Annotator {
    message_class: String,
    invalid_marker: String,
}

impl Annotator {
    #[must_use]
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            message_class: config.message_class.clone(),
            invalid_marker: config.invalid_marker.clone(),
        }
    }

    /// Renders `message` for the field and marks it invalid. Fields without a
    /// group are left untouched.
    pub fn show_error<C: Control, E: ErrorContainer>(
        &self,
        field: &BoundField<C, E>,
        message: &str,
    ) {
        let Some(group) = field.group() else {
            return;
        };

        group.clear();
        group.append_message(&self.message_class, message);

        let control = field.control();
        control.set_aria_invalid(true);
        let _ = control.set_custom_validity(&self.invalid_marker);
    }

    /// Removes the field's message and invalid markers.
    pub fn clear_error_for<C: Control, E: ErrorContainer>(&self, field: &BoundField<C, E>) {
        if let Some(group) = field.group() {
            group.clear();
        }

        let control = field.control();
        control.set_aria_invalid(false);
        let _ = control.set_custom_validity("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::headless::{HeadlessControl, HeadlessDocument, HeadlessGroup};

    fn annotator() -> Annotator {
        Annotator::new(&ValidationConfig::default())
    }

    #[test]
    fn show_error_replaces_previous_message() {
        let document = HeadlessDocument::new();
        let control = document.control("email", "email");
        let group = HeadlessGroup::new();
        let field = BoundField::new(control.clone(), Some(group.clone()));

        annotator().show_error(&field, "first");
        annotator().show_error(&field, "second");

        assert_eq!(group.messages().len(), 1);
        assert_eq!(group.messages()[0].text, "second");
        assert_eq!(group.messages()[0].class, "helper error");
        assert!(control.aria_invalid());
        assert_eq!(control.custom_validity(), "Invalid");
    }

    #[test]
    fn clear_error_for_removes_markers() {
        let control = HeadlessControl::new("email", "email");
        let group = HeadlessGroup::new();
        let field = BoundField::new(control.clone(), Some(group.clone()));

        annotator().show_error(&field, "bad");
        annotator().clear_error_for(&field);

        assert!(group.messages().is_empty());
        assert!(!control.aria_invalid());
        assert_eq!(control.custom_validity(), "");
    }

    #[test]
    fn ungrouped_field_is_not_annotated() {
        let control = HeadlessControl::new("email", "email");
        let field: BoundField<_, HeadlessGroup> = BoundField::new(control.clone(), None);

        annotator().show_error(&field, "bad");

        assert!(!control.aria_invalid());
        assert_eq!(control.custom_validity(), "");
    }

    #[test]
    fn missing_custom_validity_api_is_ignored() {
        let control = HeadlessControl::new("email", "email");
        control.set_custom_validity_supported(false);
        let group = HeadlessGroup::new();
        let field = BoundField::new(control.clone(), Some(group.clone()));

        annotator().show_error(&field, "bad");

        assert_eq!(group.messages().len(), 1);
        assert!(control.aria_invalid());
        assert_eq!(control.custom_validity(), "");
    }
}
