use dealmemo_core::{CoreError, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("benchmark provider error: {0}")]
    Provider(String),
    #[error("no benchmark data for sector '{0}'")]
    UnknownSector(String),
}

impl From<BenchmarkError> for CoreError {
    fn from(err: BenchmarkError) -> Self {
        match &err {
            BenchmarkError::Provider(_) => {
                CoreError::new(ErrorCategory::GoogleCloud, "benchmark_provider_error", err.to_string())
            }
            BenchmarkError::UnknownSector(_) => CoreError::validation(err.to_string()),
        }
    }
}
