//! Exponential-backoff retry policy ("WithRetry" in spec.md §4.1).

use dealmemo_core::CoreError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub backoff_multiplier: f64,
    pub max_delay: Duration,
    pub jitter_fraction: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(30),
            jitter_fraction: 0.1,
        }
    }
}

impl From<dealmemo_core::config::RetryConfig> for RetryPolicy {
    fn from(config: dealmemo_core::config::RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter_fraction: config.jitter_fraction,
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `n` (1-indexed): `min(maxDelay, baseDelay * multiplier^(n-1)) * (1 +/- jitter)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let raw = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = raw.min(self.max_delay.as_secs_f64());
        let jitter = if self.jitter_fraction > 0.0 {
            let mut rng = rand::thread_rng();
            let sign: f64 = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            1.0 + sign * rng.gen_range(0.0..self.jitter_fraction)
        } else {
            1.0
        };
        Duration::from_secs_f64((capped * jitter).max(0.0))
    }

    /// Run `operation` under this policy. `operation` is re-invoked (a fresh
    /// call each attempt) iff the classified error is retryable. On
    /// exhaustion the last error is surfaced unchanged.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.retryable || attempt >= self.max_attempts {
                        return Err(err);
                    }
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        code = %err.code,
                        "retrying after failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn retries_until_success_within_max_attempts() {
        let policy = RetryPolicy { jitter_fraction: 0.0, ..RetryPolicy::default() };
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = policy
            .run(move || {
                let calls = calls_clone.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(CoreError::rate_limit("rate limited"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_and_surfaces_last_error() {
        let policy = RetryPolicy { max_attempts: 3, jitter_fraction: 0.0, ..RetryPolicy::default() };
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result: Result<(), CoreError> = policy
            .run(move || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CoreError::network("still down"))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result: Result<(), CoreError> = policy
            .run(move || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CoreError::validation("bad input"))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delay_is_capped_at_max_delay() {
        let policy = RetryPolicy {
            base_delay: Duration::from_secs(1),
            backoff_multiplier: 10.0,
            max_delay: Duration::from_secs(5),
            jitter_fraction: 0.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(5));
    }
}
