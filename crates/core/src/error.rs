use thiserror::Error;

/// Errors raised while building a [`NotificationConfig`](crate::NotificationConfig)
/// from user-supplied options.
///
/// These are fatal to run startup and should be surfaced to the user
/// immediately. They never originate from the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Slack notifications are enabled but no webhook URL was supplied, or
    /// the supplied URL is blank.
    #[error("missing webhook url")]
    MissingWebhookUrl,

    /// Threshold-breach notifications are enabled but the threshold is
    /// absent or outside `[0, 100]`. A value that is not a number at all is
    /// a [`TypeMismatch`](Self::TypeMismatch) instead.
    #[error("invalid threshold")]
    InvalidThreshold,

    /// An option value could not be coerced to the type its key declares.
    #[error("option '{key}' must be a {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },

    /// The option document could not be parsed.
    #[error("failed to parse options: {0}")]
    Parse(String),

    /// The option file could not be read.
    #[error("failed to read options: {0}")]
    Io(String),
}
