//! LLM capability and prompt-manager error types.

use dealmemo_core::{CoreError, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown prompt template: {0}")]
    UnknownTemplate(String),

    #[error("template '{template}' is missing required variable '{var}'")]
    MissingVariable { template: String, var: String },
}

impl From<PromptError> for CoreError {
    fn from(err: PromptError) -> Self {
        CoreError::validation(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM call failed: {0}")]
    Provider(String),

    #[error("LLM call timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<LlmError> for CoreError {
    fn from(err: LlmError) -> Self {
        match &err {
            LlmError::Timeout(_) => CoreError::network(err.to_string()),
            LlmError::Provider(_) => {
                CoreError::new(ErrorCategory::AiService, "llm_provider_error", err.to_string())
            }
        }
    }
}
