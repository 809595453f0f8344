//! The LLM capability contract (spec.md §4.5).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 2000,
            temperature: 0.1,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// Content and category safety thresholds passed through to the
/// provider verbatim; the pipeline never inspects these fields itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyConfig {
    #[serde(default)]
    pub blocked_categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub text: String,
    pub finish_reason: FinishReason,
    #[serde(default)]
    pub safety_ratings: Option<Vec<SafetyRating>>,
    #[serde(default)]
    pub citation_metadata: Option<serde_json::Value>,
}

/// A large-language-model backend. Implementations talk to whatever
/// concrete provider the deployment wires in; the pipeline only ever
/// sees this trait, and always through the retry/timeout wrapper in
/// [`crate::analyzer`].
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(
        &self,
        system_text: &str,
        user_text: &str,
        generation_config: &GenerationConfig,
        safety_config: &SafetyConfig,
    ) -> Result<GenerationResult, dealmemo_core::CoreError>;
}
