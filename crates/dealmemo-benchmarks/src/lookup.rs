//! Benchmark lookup (spec.md §4.9): wraps the capability call in the
//! shared retry policy and degrades to "no benchmarks" on failure
//! rather than failing the pipeline.

use crate::client::{BenchmarkClient, SectorBenchmarks};
use dealmemo_resilience::RetryPolicy;

pub struct BenchmarkLookup {
    retry_policy: RetryPolicy,
}

impl BenchmarkLookup {
    pub fn new(retry_policy: RetryPolicy) -> Self {
        Self { retry_policy }
    }

    /// Looks up sector benchmarks. On failure (after retries), returns
    /// `None` and a warning rather than propagating the error: scoring
    /// proceeds with an empty benchmarks object per spec.md §7.
    pub async fn lookup(&self, client: &dyn BenchmarkClient, sector: &str) -> (Option<SectorBenchmarks>, Vec<String>) {
        match self.retry_policy.run(|| client.get_benchmarks(sector)).await {
            Ok(benchmarks) => (Some(benchmarks), Vec::new()),
            Err(err) => (None, vec![format!("benchmarking unavailable: {err}")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use dealmemo_core::CoreError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyClient {
        attempts: AtomicUsize,
        fail_times: usize,
    }

    #[async_trait]
    impl BenchmarkClient for FlakyClient {
        async fn get_benchmarks(&self, sector: &str) -> Result<SectorBenchmarks, CoreError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.fail_times {
                return Err(CoreError::rate_limit("provider is rate-limiting us"));
            }
            Ok(SectorBenchmarks {
                sector: sector.to_string(),
                sample_size: 42,
                metrics: HashMap::new(),
                last_updated: Utc::now(),
            })
        }
    }

    struct AlwaysFailingClient;
    #[async_trait]
    impl BenchmarkClient for AlwaysFailingClient {
        async fn get_benchmarks(&self, _sector: &str) -> Result<SectorBenchmarks, CoreError> {
            Err(CoreError::network("provider unreachable"))
        }
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let lookup = BenchmarkLookup::new(RetryPolicy::default());
        let client = FlakyClient { attempts: AtomicUsize::new(0), fail_times: 2 };
        let (result, warnings) = lookup.lookup(&client, "saas").await;
        assert!(result.is_some());
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn outage_degrades_to_no_benchmarks_with_warning() {
        let lookup = BenchmarkLookup::new(RetryPolicy::default());
        let (result, warnings) = lookup.lookup(&AlwaysFailingClient, "saas").await;
        assert!(result.is_none());
        assert!(warnings[0].contains("benchmarking unavailable"));
    }
}
