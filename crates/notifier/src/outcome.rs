use dqnotify_executor::{DispatchFailure, DispatchOutcome};
use serde::Serialize;

/// What happened to one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotifyOutcome {
    /// The configuration says this event does not notify.
    Skipped,
    /// The dispatcher accepted the message.
    Delivered { attempts: u32 },
    /// Delivery failed; the run carries on regardless.
    Failed(DispatchFailure),
    /// A background delivery was cancelled by [`Notifier::abort`](crate::Notifier::abort).
    Cancelled,
}

impl From<DispatchOutcome> for NotifyOutcome {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Delivered { attempts } => Self::Delivered { attempts },
            DispatchOutcome::Failed(failure) => Self::Failed(failure),
        }
    }
}

impl NotifyOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}
