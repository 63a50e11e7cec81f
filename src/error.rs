use thiserror::Error;
use wasm_bindgen::JsValue;

/// Rejected view configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}), got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("invalid range for {field}: {low} > {high}")]
    InvertedRange {
        field: &'static str,
        low: f64,
        high: f64,
    },

    #[cfg(feature = "serde_json")]
    #[error("malformed config JSON: {0}")]
    Json(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
