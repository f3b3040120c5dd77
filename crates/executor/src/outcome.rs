use serde::Serialize;

/// Result of delivering one notification through the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The dispatcher accepted the message.
    Delivered { attempts: u32 },
    /// Every attempt failed, or the error was not retryable.
    Failed(DispatchFailure),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Number of attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Delivered { attempts } => *attempts,
            Self::Failed(failure) => failure.attempts,
        }
    }
}

/// Details of a failed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchFailure {
    /// Short machine-readable code (see [`DispatchError::code`](dqnotify_dispatcher::DispatchError::code)).
    pub code: String,
    pub message: String,
    /// Whether the last error was transient.
    pub retryable: bool,
    pub attempts: u32,
}
