//! Observability hooks for the deal memo pipeline: tracing
//! initialization, a structured audit log entry, and the bounded
//! performance-metrics ring buffer spec.md's shared-resource policy
//! calls out as a process-wide singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_MAX_SAMPLES_PER_OPERATION: usize = 100;

/// Initialize tracing with default (verbose, thread-annotated) output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();
}

/// Initialize tracing with compact output, for local/CLI runs.
pub fn init_tracing_compact() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().compact())
        .init();
}

/// One entry in the pipeline's audit trail: which operation touched
/// which document, and whether it succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub document_id: String,
    pub user_id: Option<String>,
    pub details: serde_json::Value,
    pub success: bool,
    pub duration_ms: u64,
}

impl AuditEntry {
    pub fn new(operation: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: operation.into(),
            document_id: document_id.into(),
            user_id: None,
            details: serde_json::Value::Null,
            success: true,
            duration_ms: 0,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OperationStats {
    pub sample_count: usize,
    pub average: Duration,
    pub max: Duration,
}

/// Bounded per-operation latency samples. Each operation name keeps at
/// most `max_samples_per_operation` samples, oldest evicted first, per
/// spec.md's shared-resource policy for the process-wide performance
/// registry.
pub struct PerformanceMetrics {
    max_samples_per_operation: usize,
    samples: RwLock<HashMap<String, VecDeque<Duration>>>,
}

impl PerformanceMetrics {
    pub fn new(max_samples_per_operation: usize) -> Self {
        Self { max_samples_per_operation, samples: RwLock::new(HashMap::new()) }
    }

    pub fn record(&self, operation: &str, duration: Duration) {
        let mut samples = self.samples.write().expect("performance metrics lock poisoned");
        let entry = samples.entry(operation.to_string()).or_default();
        entry.push_back(duration);
        while entry.len() > self.max_samples_per_operation {
            entry.pop_front();
        }
    }

    pub fn stats(&self, operation: &str) -> Option<OperationStats> {
        let samples = self.samples.read().expect("performance metrics lock poisoned");
        let entry = samples.get(operation)?;
        if entry.is_empty() {
            return None;
        }
        let sum: Duration = entry.iter().sum();
        let max = entry.iter().max().copied().unwrap_or_default();
        Some(OperationStats { sample_count: entry.len(), average: sum / entry.len() as u32, max })
    }

    pub fn operation_names(&self) -> Vec<String> {
        self.samples.read().expect("performance metrics lock poisoned").keys().cloned().collect()
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES_PER_OPERATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_entry_builder_sets_fields() {
        let entry = AuditEntry::new("analyze", "doc_123").with_user("user_456").with_duration(42);
        assert_eq!(entry.operation, "analyze");
        assert_eq!(entry.duration_ms, 42);
        assert!(entry.success);
    }

    #[test]
    fn failed_marks_entry_unsuccessful() {
        let entry = AuditEntry::new("analyze", "doc_123").failed();
        assert!(!entry.success);
    }

    #[test]
    fn stats_reflect_recorded_samples() {
        let metrics = PerformanceMetrics::new(100);
        metrics.record("parse", Duration::from_millis(10));
        metrics.record("parse", Duration::from_millis(20));
        let stats = metrics.stats("parse").unwrap();
        assert_eq!(stats.sample_count, 2);
        assert_eq!(stats.average, Duration::from_millis(15));
        assert_eq!(stats.max, Duration::from_millis(20));
    }

    #[test]
    fn ring_buffer_evicts_oldest_sample_beyond_bound() {
        let metrics = PerformanceMetrics::new(2);
        metrics.record("parse", Duration::from_millis(1));
        metrics.record("parse", Duration::from_millis(2));
        metrics.record("parse", Duration::from_millis(3));
        let stats = metrics.stats("parse").unwrap();
        assert_eq!(stats.sample_count, 2);
        assert_eq!(stats.max, Duration::from_millis(3));
    }

    #[test]
    fn unknown_operation_has_no_stats() {
        let metrics = PerformanceMetrics::new(100);
        assert!(metrics.stats("never-recorded").is_none());
    }
}
