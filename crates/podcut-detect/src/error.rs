//! Error types for detector calls.

use thiserror::Error;

/// Result type for detector operations.
pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("provider {model} failed: {message}")]
    ProviderFailed { model: String, message: String },

    #[error("all {attempted} models in the fallback chain failed")]
    AllProvidersFailed { attempted: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DetectError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    pub fn provider_failed(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderFailed {
            model: model.into(),
            message: message.into(),
        }
    }
}
