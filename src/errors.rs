use thiserror::Error;

/// Failures of optional browser APIs touched while rendering validation
/// state. The engine discards these at the call site; they never abort a
/// validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("browser API unavailable: {0}")]
    Unavailable(&'static str),
    #[error("browser API call failed: {method}: {message}")]
    Call {
        method: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json")]
    Json(#[from] serde_json::Error),
    #[error("min_password_length must be greater than zero")]
    ZeroPasswordLength,
    #[error("{0} must not be blank")]
    BlankSetting(&'static str),
}
