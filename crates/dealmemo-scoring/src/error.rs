use dealmemo_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown weighting profile '{0}'")]
    UnknownProfile(String),
    #[error("profile '{0}' is protected and cannot be modified")]
    ProtectedProfile(String),
    #[error("invalid weightings: {0}")]
    InvalidWeightings(String),
}

impl From<ScoringError> for CoreError {
    fn from(err: ScoringError) -> Self {
        CoreError::validation(err.to_string())
    }
}
