//! Error types for spamcheck

use std::time::Duration;

/// Result type alias using spamcheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spamcheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classification service kept failing transiently until retries ran out
    #[error("service unavailable after {attempts} attempts: {reason}")]
    ServiceUnavailable { attempts: u32, reason: String },

    /// Configuration errors (bad credentials, malformed requests, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Input collaborator errors (missing columns, unreadable rows)
    #[error("input error: {0}")]
    Input(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new service unavailable error
    pub fn service_unavailable(attempts: u32, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            attempts,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ServiceUnavailable { .. })
    }
}

/// Failure reported by a single call to the classification service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Timeouts, rate limiting, 5xx responses, dropped connections
    #[error("transient service failure: {reason}")]
    Transient {
        reason: String,
        /// Minimum wait requested by the service before trying again
        retry_after: Option<Duration>,
    },

    /// Authentication failures and rejected request shapes
    #[error("fatal service failure: {reason}")]
    Fatal { reason: String },
}

impl ServiceError {
    /// Create a transient failure without a retry hint
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
            retry_after: None,
        }
    }

    /// Create a transient failure that carries the service's retry hint
    pub fn rate_limited(reason: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::Transient {
            reason: reason.into(),
            retry_after,
        }
    }

    /// Create a fatal failure
    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::Fatal {
            reason: reason.into(),
        }
    }

    /// Whether the call may succeed if retried
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Retry hint, if the service sent one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Transient { retry_after, .. } => *retry_after,
            Self::Fatal { .. } => None,
        }
    }

    /// Human readable reason
    pub fn reason(&self) -> &str {
        match self {
            Self::Transient { reason, .. } | Self::Fatal { reason } => reason,
        }
    }
}
