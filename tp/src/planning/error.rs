//! Plan generation error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors that abort a plan generation
///
/// Every failure is total: no partial plan is ever returned.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Provider credential missing or placeholder, or unknown provider
    #[error("{0}")]
    Configuration(String),

    /// Network failure, non-success response or provider-reported error
    #[error("{0}")]
    Provider(String),

    /// The extracted text is not valid JSON
    #[error("Failed to parse task plan: {0}")]
    Parse(String),

    /// A task failed validation, or no tasks were produced
    #[error("{0}")]
    Validation(String),
}

impl From<LlmError> for PlanError {
    fn from(err: LlmError) -> Self {
        if err.is_configuration() {
            PlanError::Configuration(err.to_string())
        } else {
            PlanError::Provider(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_configuration_error_maps_to_configuration() {
        let err: PlanError = LlmError::Configuration("OpenAI API key not configured".to_string()).into();
        assert!(matches!(err, PlanError::Configuration(_)));
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }

    #[test]
    fn test_llm_api_error_maps_to_provider() {
        let err: PlanError = LlmError::ApiError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, PlanError::Provider(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_no_models_maps_to_provider() {
        let err: PlanError = LlmError::NoModels {
            provider: "Gemini".to_string(),
        }
        .into();
        assert!(matches!(err, PlanError::Provider(_)));
    }

    #[test]
    fn test_parse_error_message() {
        let err = PlanError::Parse("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to parse task plan: expected value at line 1 column 1"
        );
    }
}
