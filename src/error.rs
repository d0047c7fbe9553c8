//! Errors raised while reading configuration. The fitting core itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {option} value {value:?} (expected one of: {expected})")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("item {index}: {message}")]
    InvalidItem { index: usize, message: String },

    #[error("failed to parse item file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("font could not be loaded: {0}")]
    Font(String),
}
