//! Client-side validation for the authentication forms.
//!
//! Fields are validated on `input` and `blur`, and the whole form is checked
//! on `submit`. Invalid forms never reach the submit handlers registered
//! after ours (loading overlay, double-submit guard), and every invalid field
//! gets a single inline message inside its `form-group`.
//!
//! The rules and the event semantics are platform neutral: they run against
//! the [`controls::Control`] and [`controls::ErrorContainer`] traits. The
//! browser implementation lives in `controls::browser` (wasm32 only) and the
//! in-memory one in [`controls::headless`], which backs the tests and the
//! `permesi-forms` command-line harness.

pub mod binding;
pub mod config;
pub mod controls;
pub mod errors;
pub mod render;
pub mod validation;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use binding::{EventOutcome, FormBinding, FormEvent};
pub use config::ValidationConfig;
pub use errors::{ConfigError, ControlError};
pub use validation::{
    BoundField, Field, FieldKind, Form, ValidationError, ValidationResult, Validator,
};

#[cfg(target_arch = "wasm32")]
pub use controls::browser::init_form_validation;
