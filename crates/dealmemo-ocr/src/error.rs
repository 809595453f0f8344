//! OCR capability error type. Every OCR failure is wrapped as an
//! `ai_service` [`dealmemo_core::CoreError`] and, since the underlying
//! vision provider is an outward network call, is retryable by default.

use dealmemo_core::{CoreError, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR provider call failed: {0}")]
    Provider(String),

    #[error("both document and text detectors returned empty output")]
    NoTextDetected,
}

impl From<OcrError> for CoreError {
    fn from(err: OcrError) -> Self {
        CoreError::new(ErrorCategory::AiService, "ocr_failed", err.to_string())
    }
}

pub type OcrOutcome<T> = Result<T, OcrError>;
