//! # dealmemo-core
//!
//! Core data model, error taxonomy, and process-wide configuration for
//! the deal memo analysis pipeline. Every other crate in the workspace
//! depends on this one and nothing else upstream of it.
//!
//! ## Key types
//!
//! - [`model::ProcessedDocument`], [`model::AnalysisResult`], [`model::DealMemo`] — the pipeline's artifacts.
//! - [`error::CoreError`] — the single error taxonomy shared across crate boundaries.
//! - [`config::PipelineConfig`] — the configuration surface from spec.md §6.

pub mod config;
pub mod error;
pub mod model;

pub use config::PipelineConfig;
pub use error::{classify, classify_error, CoreError, CoreResult, ErrorCategory, Severity};
