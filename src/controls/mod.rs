//! Seams between the validation engine and whatever holds the form controls.
//!
//! Implementations are reference handles: cloning one yields another view of
//! the same control, and all mutation goes through `&self`, the way DOM
//! element handles behave. Nothing here is `Send`; validation runs on the UI
//! thread only.

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod headless;

use crate::errors::ControlError;

/// An `input`, `textarea` or `select` element.
pub trait Control {
    fn name(&self) -> String;
    fn input_type(&self) -> String;
    fn value(&self) -> String;
    fn is_required(&self) -> bool;
    fn is_disabled(&self) -> bool;

    /// Sets or removes `aria-invalid="true"`.
    fn set_aria_invalid(&self, invalid: bool);

    /// Optional API; may be missing in some environments.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unavailable or throws.
    fn set_custom_validity(&self, message: &str) -> Result<(), ControlError>;

    /// # Errors
    ///
    /// Returns an error if the control cannot take focus.
    fn focus(&self) -> Result<(), ControlError>;
}

/// Message container inside a field's `form-group`.
pub trait ErrorContainer {
    /// Removes every rendered message.
    fn clear(&self);

    /// Appends one message node, creating the container on first use.
    fn append_message(&self, class: &str, text: &str);
}

/// The form element itself.
pub trait FormHandle {
    /// Triggers the browser's built-in validity UI.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unavailable or throws.
    fn report_validity(&self) -> Result<(), ControlError>;
}
