//! In-memory controls for running the engine without a browser. They record
//! every effect the engine has on them (messages, `aria-invalid`, custom
//! validity, focus, validity reports) so callers can inspect the outcome.

use super::{Control, ErrorContainer, FormHandle};
use crate::errors::ControlError;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

#[derive(Debug, Default)]
struct DocumentState {
    next_id: Cell<usize>,
    active: RefCell<Option<(usize, String)>>,
}

/// Tracks which control currently has focus.
#[derive(Clone, Debug, Default)]
pub struct HeadlessDocument {
    state: Rc<DocumentState>,
}

impl HeadlessDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a control owned by this document.
    #[must_use]
    pub fn control(&self, name: &str, input_type: &str) -> HeadlessControl {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);

        HeadlessControl {
            state: Rc::new(ControlState {
                id,
                document: Rc::clone(&self.state),
                name: name.to_string(),
                input_type: input_type.to_string(),
                value: RefCell::default(),
                required: Cell::new(false),
                disabled: Cell::new(false),
                aria_invalid: Cell::new(false),
                custom_validity: RefCell::default(),
                custom_validity_supported: Cell::new(true),
                focus_calls: Cell::new(0),
            }),
        }
    }

    /// Name of the focused control, if any.
    #[must_use]
    pub fn active_name(&self) -> Option<String> {
        self.state
            .active
            .borrow()
            .as_ref()
            .map(|(_, name)| name.clone())
    }
}

#[derive(Debug)]
struct ControlState {
    id: usize,
    document: Rc<DocumentState>,
    name: String,
    input_type: String,
    value: RefCell<String>,
    required: Cell<bool>,
    disabled: Cell<bool>,
    aria_invalid: Cell<bool>,
    custom_validity: RefCell<String>,
    custom_validity_supported: Cell<bool>,
    focus_calls: Cell<u32>,
}

#[derive(Clone, Debug)]
pub struct HeadlessControl {
    state: Rc<ControlState>,
}

impl HeadlessControl {
    /// Creates a control in its own document.
    #[must_use]
    pub fn new(name: &str, input_type: &str) -> Self {
        HeadlessDocument::new().control(name, input_type)
    }

    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.set_required(true);
        self
    }

    pub fn set_value(&self, value: &str) {
        *self.state.value.borrow_mut() = value.to_string();
    }

    pub fn set_required(&self, required: bool) {
        self.state.required.set(required);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state.disabled.set(disabled);
    }

    /// Simulates environments without `setCustomValidity`.
    pub fn set_custom_validity_supported(&self, supported: bool) {
        self.state.custom_validity_supported.set(supported);
    }

    #[must_use]
    pub fn aria_invalid(&self) -> bool {
        self.state.aria_invalid.get()
    }

    #[must_use]
    pub fn custom_validity(&self) -> String {
        self.state.custom_validity.borrow().clone()
    }

    #[must_use]
    pub fn focus_calls(&self) -> u32 {
        self.state.focus_calls.get()
    }

    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.state
            .document
            .active
            .borrow()
            .as_ref()
            .is_some_and(|(id, _)| *id == self.state.id)
    }
}

impl Control for HeadlessControl {
    fn name(&self) -> String {
        self.state.name.clone()
    }

    fn input_type(&self) -> String {
        self.state.input_type.clone()
    }

    fn value(&self) -> String {
        self.state.value.borrow().clone()
    }

    fn is_required(&self) -> bool {
        self.state.required.get()
    }

    fn is_disabled(&self) -> bool {
        self.state.disabled.get()
    }

    fn set_aria_invalid(&self, invalid: bool) {
        self.state.aria_invalid.set(invalid);
    }

    fn set_custom_validity(&self, message: &str) -> Result<(), ControlError> {
        if !self.state.custom_validity_supported.get() {
            return Err(ControlError::Unavailable("setCustomValidity"));
        }
        *self.state.custom_validity.borrow_mut() = message.to_string();
        Ok(())
    }

    fn focus(&self) -> Result<(), ControlError> {
        self.state.focus_calls.set(self.state.focus_calls.get() + 1);
        *self.state.document.active.borrow_mut() =
            Some((self.state.id, self.state.name.clone()));
        Ok(())
    }
}

/// A rendered message node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub class: String,
    pub text: String,
}

#[derive(Debug, Default)]
struct GroupState {
    container_created: bool,
    messages: Vec<Annotation>,
}

#[derive(Clone, Debug, Default)]
pub struct HeadlessGroup {
    state: Rc<RefCell<GroupState>>,
}

impl HeadlessGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Annotation> {
        self.state.borrow().messages.clone()
    }

    /// Whether a message was ever rendered into this group.
    #[must_use]
    pub fn has_container(&self) -> bool {
        self.state.borrow().container_created
    }
}

impl ErrorContainer for HeadlessGroup {
    fn clear(&self) {
        self.state.borrow_mut().messages.clear();
    }

    fn append_message(&self, class: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        state.container_created = true;
        state.messages.push(Annotation {
            class: class.to_string(),
            text: text.to_string(),
        });
    }
}

#[derive(Debug)]
struct FormState {
    report_calls: Cell<u32>,
    report_validity_supported: Cell<bool>,
}

#[derive(Clone, Debug)]
pub struct HeadlessForm {
    state: Rc<FormState>,
}

impl Default for HeadlessForm {
    fn default() -> Self {
        Self {
            state: Rc::new(FormState {
                report_calls: Cell::new(0),
                report_validity_supported: Cell::new(true),
            }),
        }
    }
}

impl HeadlessForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates environments without `reportValidity`.
    pub fn set_report_validity_supported(&self, supported: bool) {
        self.state.report_validity_supported.set(supported);
    }

    #[must_use]
    pub fn report_calls(&self) -> u32 {
        self.state.report_calls.get()
    }
}

impl FormHandle for HeadlessForm {
    fn report_validity(&self) -> Result<(), ControlError> {
        if !self.state.report_validity_supported.get() {
            return Err(ControlError::Unavailable("reportValidity"));
        }
        self.state.report_calls.set(self.state.report_calls.get() + 1);
        Ok(())
    }
}
