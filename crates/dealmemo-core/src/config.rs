//! Process-wide configuration surface (spec.md §6), loaded once and
//! passed by reference into every pipeline stage. Construction follows
//! the teacher's builder idiom (`with_x(mut self, ...) -> Self`).

use crate::model::Weightings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub model: String,
    pub max_output_tokens: u32,
    pub default_temperature: f32,
    pub default_top_p: f32,
    pub default_top_k: u32,
    /// Upper bound on concurrently in-flight prompts (§9 "coroutine-style orchestration").
    pub max_concurrency: usize,
    pub per_call_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "default-llm".to_string(),
            max_output_tokens: 2000,
            default_temperature: 0.1,
            default_top_p: 0.95,
            default_top_k: 40,
            max_concurrency: 4,
            per_call_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub max_delay_ms: u64,
    pub jitter_fraction: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            backoff_multiplier: 2.0,
            max_delay_ms: 30_000,
            jitter_fraction: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub recovery_timeout_ms: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyTolerances {
    /// Relative tolerance for financial metrics (e.g. 0.05 = ±5%).
    pub financial: f64,
    /// Absolute tolerance in percentage points for rates/NPS.
    pub percentage: f64,
    /// Relative tolerance for counts (e.g. 0.10 = ±10%).
    pub count: f64,
    pub date_days: i64,
}

impl Default for ConsistencyTolerances {
    fn default() -> Self {
        Self {
            financial: 0.05,
            percentage: 2.0,
            count: 0.10,
            date_days: 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyConfig {
    pub tolerances: ConsistencyTolerances,
    pub critical_metrics: Vec<String>,
    pub prioritize_recent: bool,
    pub require_all_documents: bool,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            tolerances: ConsistencyTolerances::default(),
            critical_metrics: vec![
                "arr", "mrr", "customers", "teamSize", "foundersCount", "totalRaised",
                "valuation", "foundedYear", "churnRate",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            prioritize_recent: true,
            require_all_documents: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub default_weightings: Weightings,
    pub weighting_tolerance_percent: f64,
    pub allow_zero_weights: bool,
    pub require_all_weights: bool,
    /// Open Question #2 (spec.md §9): whether `HOLD` may be emitted, or
    /// collapses into `PASS`.
    pub allow_hold_tier: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_weightings: Weightings::default(),
            weighting_tolerance_percent: 0.01,
            allow_zero_weights: false,
            require_all_weights: true,
            allow_hold_tier: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    pub confidence_threshold: f64,
    pub language_hints: Vec<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            language_hints: vec!["en".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    pub max_metrics_per_operation: usize,
    pub alert_error_rate: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_metrics_per_operation: 100,
            alert_error_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    pub max_concurrency: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

/// Open Question #3 (spec.md §9): the degradation manager's critical
/// service set, made explicit config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationConfig {
    pub critical_services: HashSet<String>,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        let mut critical_services = HashSet::new();
        critical_services.insert("llm".to_string());
        Self { critical_services }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub llm: LlmConfig,
    pub retry: RetryConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub consistency: ConsistencyConfig,
    pub scoring: ScoringConfig,
    pub ocr: OcrConfig,
    pub performance: PerformanceConfig,
    pub parser: ParserConfig,
    pub degradation: DegradationConfig,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn llm(mut self, llm: LlmConfig) -> Self {
        self.config.llm = llm;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn circuit_breaker(mut self, circuit_breaker: CircuitBreakerConfig) -> Self {
        self.config.circuit_breaker = circuit_breaker;
        self
    }

    pub fn consistency(mut self, consistency: ConsistencyConfig) -> Self {
        self.config.consistency = consistency;
        self
    }

    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn ocr(mut self, ocr: OcrConfig) -> Self {
        self.config.ocr = ocr;
        self
    }

    pub fn degradation(mut self, degradation: DegradationConfig) -> Self {
        self.config.degradation = degradation;
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
