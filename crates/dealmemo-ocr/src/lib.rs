//! # dealmemo-ocr
//!
//! The OCR capability contract the document processing stage falls
//! back to for scanned or image-heavy documents, plus the block-level
//! reading-order reconstruction that turns vision output into
//! [`dealmemo_core::model::DocumentSection`]s.

pub mod client;
pub mod error;
pub mod sections;

pub use client::{run_ocr, BoundingBox, OcrBlock, OcrClient, OcrPage, OcrResult};
pub use error::{OcrError, OcrOutcome};
pub use sections::{page_to_sections, pages_to_sections};
