//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Configuration(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No {provider} models found for this API key. Verify your key and project permissions.")]
    NoModels { provider: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Build an `ApiError` from a non-success response body
    ///
    /// Providers report failures as `{"error": {"message": "..."}}`; when that
    /// shape is present only the message is kept, otherwise the raw body is.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        LlmError::ApiError { status, message }
    }

    /// Check if this error comes from missing or invalid local configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::Configuration(_))
    }
}
