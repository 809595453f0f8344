use dealmemo_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid reconciliation options: {0}")]
    InvalidOptions(String),
}

impl From<ExtractionError> for CoreError {
    fn from(err: ExtractionError) -> Self {
        CoreError::validation(err.to_string())
    }
}
