use std::time::Duration;

use thiserror::Error;

/// Errors a [`Dispatcher`](crate::Dispatcher) can report while delivering a
/// notification.
///
/// Callers must never let these abort a data-quality run. The executor
/// retries the transient ones and turns the rest into a failed outcome.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The endpoint did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The endpoint asked us to slow down.
    #[error("rate limited")]
    RateLimited,

    /// The endpoint accepted the request but refused the message.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The dispatcher was misconfigured (e.g. an unusable webhook URL).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The message could not be encoded for delivery.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DispatchError {
    /// Returns `true` if the error is transient and delivery may succeed on
    /// retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited
        )
    }

    /// Short machine-readable code for logs and outcomes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "TIMEOUT",
            Self::Connection(_) => "CONNECTION",
            Self::RateLimited => "RATE_LIMITED",
            Self::Rejected(_) => "REJECTED",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}
