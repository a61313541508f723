//! Validation settings with an optional runtime override. In the browser the
//! override is read from `window.PERMESI_FORMS_CONFIG` (if present) so static
//! deployments can tune selectors or the password minimum without rebuilding.
//! Configuration values are public; do not store secrets here.

use crate::errors::ConfigError;
use serde::Deserialize;

/// Minimum password length enforced by the client for early UX feedback.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub min_password_length: usize,
    /// Forms that get validation listeners.
    pub form_selector: String,
    /// Class marking the ancestor that hosts a field's error messages.
    pub group_class: String,
    /// Class of the container created inside the group.
    pub errors_class: String,
    /// Class list applied to each rendered message.
    pub message_class: String,
    /// Custom validity string set on invalid fields.
    pub invalid_marker: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            form_selector: ".auth-form".to_string(),
            group_class: "form-group".to_string(),
            errors_class: "form-errors".to_string(),
            message_class: "helper error".to_string(),
            invalid_marker: "Invalid".to_string(),
        }
    }
}

impl ValidationConfig {
    /// Loads the defaults and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Parses a JSON config document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON, carries unknown
    /// keys, sets `min_password_length` to zero, or leaves a selector, class
    /// or the invalid marker blank.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.checked()
    }

    /// Overrides the password minimum.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is zero.
    pub fn with_min_password_length(mut self, length: usize) -> Result<Self, ConfigError> {
        self.min_password_length = length;
        self.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.min_password_length == 0 {
            return Err(ConfigError::ZeroPasswordLength);
        }

        for (key, value) in [
            ("form_selector", &self.form_selector),
            ("group_class", &self.group_class),
            ("errors_class", &self.errors_class),
            ("message_class", &self.message_class),
            ("invalid_marker", &self.invalid_marker),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::BlankSetting(key));
            }
        }

        Ok(self)
    }
}

#[derive(Default)]
struct RuntimeConfig {
    min_password_length: Option<usize>,
    form_selector: Option<String>,
    group_class: Option<String>,
    errors_class: Option<String>,
    message_class: Option<String>,
    invalid_marker: Option<String>,
}

fn apply_runtime_overrides(config: &mut ValidationConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.min_password_length.filter(|length| *length > 0) {
        config.min_password_length = value;
    }
    if let Some(value) = runtime.form_selector {
        config.form_selector = value;
    }
    if let Some(value) = runtime.group_class {
        config.group_class = value;
    }
    if let Some(value) = runtime.errors_class {
        config.errors_class = value;
    }
    if let Some(value) = runtime.message_class {
        config.message_class = value;
    }
    if let Some(value) = runtime.invalid_marker {
        config.invalid_marker = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("PERMESI_FORMS_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        min_password_length: read_runtime_number(&object, "min_password_length"),
        form_selector: read_runtime_value(&object, "form_selector"),
        group_class: read_runtime_value(&object, "group_class"),
        errors_class: read_runtime_value(&object, "errors_class"),
        message_class: read_runtime_value(&object, "message_class"),
        invalid_marker: read_runtime_value(&object, "invalid_marker"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_number(object: &js_sys::Object, key: &str) -> Option<usize> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    match value.as_f64() {
        Some(number) => normalize_runtime_number(number),
        None => normalize_runtime_value(&value.as_string()?)?.parse().ok(),
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn normalize_runtime_number(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}
