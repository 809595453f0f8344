//! Parser error type. Every parser failure is wrapped as a
//! `document_processing` [`dealmemo_core::CoreError`] and is
//! non-retryable (spec.md §4.2 "Failure semantics").

use dealmemo_core::{CoreError, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("unsupported container structure: {0}")]
    MalformedContainer(String),

    #[error("io error while reading document bytes: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<ParserError> for CoreError {
    fn from(err: ParserError) -> Self {
        CoreError::new(ErrorCategory::DocumentProcessing, "parser_failed", err.to_string())
            .with_retryable(false)
    }
}

pub type ParseOutcome<T> = Result<T, ParserError>;
