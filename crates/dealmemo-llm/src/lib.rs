//! # dealmemo-llm
//!
//! The prompt manager and LLM analyzer: named templates with variable
//! interpolation, and the concurrent four-prompt workflow that turns
//! document text into a structured [`dealmemo_core::model::AnalysisResult`].

pub mod analyzer;
pub mod client;
pub mod error;
pub mod templates;

pub use analyzer::LlmAnalyzer;
pub use client::{FinishReason, GenerationConfig, GenerationResult, LlmClient, SafetyConfig, SafetyRating};
pub use error::{LlmError, PromptError};
pub use templates::{AnalysisContext, PreparedPrompt, PromptManager, PromptTemplate, WORKFLOW_TEMPLATES};
