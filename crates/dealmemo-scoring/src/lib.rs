//! # dealmemo-scoring
//!
//! The weighting manager (validate / normalize / profile registry) and
//! the deterministic score calculator that turns an
//! [`dealmemo_core::model::AnalysisResult`] plus benchmarks and
//! weightings into a [`dealmemo_core::model::ScoreBreakdown`].

pub mod calculator;
pub mod error;
pub mod strategy;
pub mod weighting;

pub use calculator::ScoreCalculator;
pub use error::ScoringError;
pub use strategy::{DefaultScoringStrategy, ScoringStrategy};
pub use weighting::{normalize, validate, PartialWeightings, ValidateOptions, WeightingManager, WeightingProfile};
