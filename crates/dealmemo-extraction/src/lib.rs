//! # dealmemo-extraction
//!
//! The pattern-based entity extractor and the pattern+LLM entity
//! reconciler that together populate
//! [`dealmemo_core::model::ExtractedEntity`] records ahead of scoring.

pub mod error;
pub mod pattern;
pub mod reconciler;

pub use error::ExtractionError;
pub use pattern::{extract_entities, parse_money, validate_metric, MetricSpec, CATALOG};
pub use reconciler::{reconcile, ReconcileOptions};
