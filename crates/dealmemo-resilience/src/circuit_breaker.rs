//! Per-service-name circuit breaker (spec.md §4.1).
//!
//! `half_open` admits at most one probe call; concurrent callers that
//! arrive while a probe is in flight see `circuit_open` without the
//! wrapped operation ever running.

use dealmemo_core::CoreError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(60),
        }
    }
}

impl From<dealmemo_core::config::CircuitBreakerConfig> for CircuitBreakerConfig {
    fn from(config: dealmemo_core::config::CircuitBreakerConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold,
            recovery_timeout: Duration::from_millis(config.recovery_timeout_ms),
        }
    }
}

struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    probe_in_flight: bool,
}

/// A single named circuit. Cheap to clone (wraps an `Arc`); safe to share
/// across tasks.
#[derive(Clone)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Arc<Mutex<Inner>>,
}

enum Admission {
    Allowed { was_probe: bool },
    Rejected,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                probe_in_flight: false,
            })),
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().unwrap().state
    }

    fn admit(&self) -> Admission {
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            CircuitState::Closed => Admission::Allowed { was_probe: false },
            CircuitState::Open => {
                let elapsed = inner.opened_at.map(|t| t.elapsed()).unwrap_or_default();
                if elapsed >= self.config.recovery_timeout {
                    inner.state = CircuitState::HalfOpen;
                    inner.probe_in_flight = true;
                    info!(service = %self.name, "circuit breaker entering half_open");
                    Admission::Allowed { was_probe: true }
                } else {
                    Admission::Rejected
                }
            }
            CircuitState::HalfOpen => {
                if inner.probe_in_flight {
                    Admission::Rejected
                } else {
                    inner.probe_in_flight = true;
                    Admission::Allowed { was_probe: true }
                }
            }
        }
    }

    fn record_success(&self, was_probe: bool) {
        let mut inner = self.inner.lock().unwrap();
        if was_probe {
            inner.state = CircuitState::Closed;
            inner.probe_in_flight = false;
        }
        inner.consecutive_failures = 0;
        inner.opened_at = None;
    }

    fn record_failure(&self, was_probe: bool) {
        let mut inner = self.inner.lock().unwrap();
        if was_probe {
            inner.state = CircuitState::Open;
            inner.opened_at = Some(Instant::now());
            inner.probe_in_flight = false;
            warn!(service = %self.name, "half_open probe failed, reopening circuit");
            return;
        }
        inner.consecutive_failures += 1;
        if inner.consecutive_failures >= self.config.failure_threshold {
            inner.state = CircuitState::Open;
            inner.opened_at = Some(Instant::now());
            warn!(service = %self.name, failures = inner.consecutive_failures, "circuit breaker opened");
        }
    }

    /// Run `operation` through the breaker. Fails fast with `circuit_open`
    /// without invoking `operation` when the circuit is open or a
    /// half_open probe is already in flight.
    pub async fn call<T, F, Fut>(&self, operation: F) -> Result<T, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let was_probe = match self.admit() {
            Admission::Rejected => return Err(CoreError::circuit_open(&self.name)),
            Admission::Allowed { was_probe } => was_probe,
        };

        match operation().await {
            Ok(value) => {
                self.record_success(was_probe);
                Ok(value)
            }
            Err(err) => {
                self.record_failure(was_probe);
                Err(err)
            }
        }
    }
}

/// Process-wide registry of circuit breakers keyed by logical service
/// name. Internally mutually exclusive, matching the shared-resource
/// policy in spec.md §5.
#[derive(Clone, Default)]
pub struct CircuitBreakerRegistry {
    breakers: Arc<Mutex<HashMap<String, CircuitBreaker>>>,
    default_config: CircuitBreakerConfig,
}

impl CircuitBreakerRegistry {
    pub fn new(default_config: CircuitBreakerConfig) -> Self {
        Self {
            breakers: Arc::new(Mutex::new(HashMap::new())),
            default_config,
        }
    }

    pub fn get_or_create(&self, service: &str) -> CircuitBreaker {
        let mut breakers = self.breakers.lock().unwrap();
        breakers
            .entry(service.to_string())
            .or_insert_with(|| CircuitBreaker::new(service, self.default_config))
            .clone()
    }
}
