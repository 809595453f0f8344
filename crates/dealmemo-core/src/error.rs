//! Error taxonomy shared by every crate in the pipeline.
//!
//! The taxonomy is categorical, not hierarchical: every error that
//! crosses a crate boundary is a [`CoreError`] carrying a
//! [`ErrorCategory`], a severity, and an intrinsic `retryable` flag.
//! Callers must respect `retryable` rather than re-deriving it from the
//! category at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level error category. Retryability is intrinsic to the category
/// (see [`ErrorCategory::is_retryable`]); it is not a caller decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    DocumentProcessing,
    AiService,
    Network,
    RateLimit,
    Authentication,
    GoogleCloud,
    Internal,
}

impl ErrorCategory {
    /// Whether errors of this category are retryable by [`WithRetry`]-style
    /// callers. This is intrinsic: `document_processing` and `validation`
    /// failures never succeed on retry without a different input.
    pub fn is_retryable(self) -> bool {
        match self {
            ErrorCategory::Validation => false,
            ErrorCategory::DocumentProcessing => false,
            ErrorCategory::AiService => true,
            ErrorCategory::Network => true,
            ErrorCategory::RateLimit => true,
            ErrorCategory::Authentication => false,
            ErrorCategory::GoogleCloud => true,
            ErrorCategory::Internal => false,
        }
    }

    fn default_severity(self) -> Severity {
        match self {
            ErrorCategory::Validation => Severity::Medium,
            ErrorCategory::DocumentProcessing => Severity::Medium,
            ErrorCategory::AiService => Severity::High,
            ErrorCategory::Network => Severity::Medium,
            ErrorCategory::RateLimit => Severity::Low,
            ErrorCategory::Authentication => Severity::Critical,
            ErrorCategory::GoogleCloud => Severity::Medium,
            ErrorCategory::Internal => Severity::High,
        }
    }

    fn default_http_status(self) -> u16 {
        match self {
            ErrorCategory::Validation => 400,
            ErrorCategory::DocumentProcessing => 422,
            ErrorCategory::AiService => 502,
            ErrorCategory::Network => 503,
            ErrorCategory::RateLimit => 429,
            ErrorCategory::Authentication => 401,
            ErrorCategory::GoogleCloud => 502,
            ErrorCategory::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A single, structured pipeline error. Every public fallible operation
/// in the workspace returns `Result<T, CoreError>` (or a crate-local
/// error that carries a `CoreError` via `#[from]`/`#[error(transparent)]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreError {
    pub category: ErrorCategory,
    pub severity: Severity,
    pub retryable: bool,
    pub http_status_hint: u16,
    /// Stable machine-readable code, e.g. `"extraction_failed"`, `"circuit_open"`, `"cancelled"`.
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub suggested_action: String,
}

impl CoreError {
    pub fn new(category: ErrorCategory, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: category.default_severity(),
            retryable: category.is_retryable(),
            http_status_hint: category.default_http_status(),
            code: code.into(),
            message: message.into(),
            details: serde_json::Value::Null,
            timestamp: Utc::now(),
            suggested_action: default_suggested_action(category),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_suggested_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = action.into();
        self
    }

    /// Force `retryable`, overriding the category default. Used for the
    /// two distinguished non-retryable errors that otherwise share a
    /// retryable category: `circuit_open` (network/ai_service) and
    /// `cancelled` (internal).
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, "validation_error", message)
    }

    pub fn document_processing(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::DocumentProcessing, "document_processing_error", message)
    }

    pub fn ai_service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::AiService, code, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Network, "network_error", message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::RateLimit, "rate_limited", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Internal, "internal_error", message)
    }

    /// The distinguished circuit-open error: a call rejected by an open
    /// circuit breaker without invoking the wrapped operation.
    pub fn circuit_open(service: &str) -> Self {
        Self::new(
            ErrorCategory::Network,
            "circuit_open",
            format!("circuit breaker for '{service}' is open"),
        )
        .with_retryable(false)
    }

    /// The distinguished cancellation error. Never retryable regardless
    /// of the operation it interrupted.
    pub fn cancelled() -> Self {
        Self::new(ErrorCategory::Internal, "cancelled", "operation was cancelled")
            .with_retryable(false)
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, category_label(self.category), self.message)
    }
}

impl std::error::Error for CoreError {}

fn category_label(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Validation => "validation",
        ErrorCategory::DocumentProcessing => "document_processing",
        ErrorCategory::AiService => "ai_service",
        ErrorCategory::Network => "network",
        ErrorCategory::RateLimit => "rate_limit",
        ErrorCategory::Authentication => "authentication",
        ErrorCategory::GoogleCloud => "google_cloud",
        ErrorCategory::Internal => "internal",
    }
}

fn default_suggested_action(category: ErrorCategory) -> String {
    match category {
        ErrorCategory::Validation => "Correct the input and resubmit.".to_string(),
        ErrorCategory::DocumentProcessing => "Re-export or re-upload the affected document.".to_string(),
        ErrorCategory::AiService => "Retry shortly; escalate if the issue persists.".to_string(),
        ErrorCategory::Network => "Retry shortly.".to_string(),
        ErrorCategory::RateLimit => "Retry after backing off.".to_string(),
        ErrorCategory::Authentication => "Check credentials and permissions.".to_string(),
        ErrorCategory::GoogleCloud => "Retry shortly; check provider status.".to_string(),
        ErrorCategory::Internal => "Contact support if the issue persists.".to_string(),
    }
}

/// Classify an anonymous error string into a category, per the free-text
/// rules in spec.md §7. Used when wrapping errors from dependencies that
/// do not already carry a [`CoreError`].
pub fn classify(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();
    if lower.contains("rate limit") || lower.contains("too many requests") {
        ErrorCategory::RateLimit
    } else if lower.contains("timeout") || lower.contains("econnreset") || lower.contains("network") {
        ErrorCategory::Network
    } else if lower.contains("unauthorized") || lower.contains("401") || lower.contains("permission") {
        ErrorCategory::Authentication
    } else if lower.contains("invalid") || lower.contains("schema") {
        ErrorCategory::Validation
    } else {
        ErrorCategory::Internal
    }
}

/// Build a [`CoreError`] from free text using [`classify`].
pub fn classify_error(message: impl Into<String>) -> CoreError {
    let message = message.into();
    let category = classify(&message);
    CoreError::new(category, default_code_for(category), message)
}

fn default_code_for(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Validation => "validation_error",
        ErrorCategory::DocumentProcessing => "document_processing_error",
        ErrorCategory::AiService => "ai_service_error",
        ErrorCategory::Network => "network_error",
        ErrorCategory::RateLimit => "rate_limited",
        ErrorCategory::Authentication => "authentication_error",
        ErrorCategory::GoogleCloud => "google_cloud_error",
        ErrorCategory::Internal => "internal_error",
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
