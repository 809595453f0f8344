//! # dealmemo-resilience
//!
//! The resilience substrate every outward capability call in the
//! pipeline runs through: exponential-backoff retry, a per-service
//! circuit breaker, and a service degradation registry.

pub mod circuit_breaker;
pub mod degradation;
pub mod retry;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerRegistry, CircuitState};
pub use degradation::DegradationManager;
pub use retry::RetryPolicy;
