use std::sync::Arc;
use std::time::Duration;

use dqnotify_core::{LifecycleEvent, NotificationConfig, RunContext};
use dqnotify_dispatcher::DynDispatcher;
use dqnotify_executor::{DispatchExecutor, ExecutorConfig};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

use crate::outcome::NotifyOutcome;

/// Sends lifecycle notifications for one data-quality run.
///
/// Cheap to clone; clones share the same configuration, executor, and
/// background task set. Nothing here returns an error to the caller: failed
/// deliveries are logged and reported as [`NotifyOutcome::Failed`].
#[derive(Clone)]
pub struct Notifier {
    pub(crate) inner: Arc<NotifierInner>,
    pub(crate) tracker: TaskTracker,
    pub(crate) cancel: CancellationToken,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

pub(crate) struct NotifierInner {
    pub(crate) config: NotificationConfig,
    pub(crate) dispatcher: Arc<dyn DynDispatcher>,
    pub(crate) executor: DispatchExecutor,
}

impl NotifierInner {
    async fn deliver(&self, event: LifecycleEvent, context: &RunContext) -> NotifyOutcome {
        if !self.config.should_notify(event, context) {
            debug!(%event, job = %context.job, "notification not configured for event");
            return NotifyOutcome::Skipped;
        }
        let Some(url) = self.config.webhook_url() else {
            return NotifyOutcome::Skipped;
        };

        let message = self.config.build_message(event, context);
        let outcome = NotifyOutcome::from(
            self.executor
                .execute(url, &message, self.dispatcher.as_ref())
                .await,
        );

        match &outcome {
            NotifyOutcome::Delivered { attempts } => {
                info!(%event, job = %context.job, attempts, "notification sent");
            }
            NotifyOutcome::Failed(failure) => {
                warn!(
                    %event,
                    job = %context.job,
                    code = %failure.code,
                    error = %failure.message,
                    attempts = failure.attempts,
                    "notification failed, continuing run"
                );
            }
            NotifyOutcome::Skipped | NotifyOutcome::Cancelled => {}
        }
        outcome
    }
}

impl Notifier {
    pub fn config(&self) -> &NotificationConfig {
        &self.inner.config
    }

    pub fn executor_config(&self) -> &ExecutorConfig {
        self.inner.executor.config()
    }

    /// Notify for `event` and wait for the delivery to finish.
    ///
    /// Bounded by the executor's timeout and retry limits.
    #[instrument(skip(self, context), fields(job = %context.job))]
    pub async fn notify(&self, event: LifecycleEvent, context: &RunContext) -> NotifyOutcome {
        self.inner.deliver(event, context).await
    }

    /// Notify for `event` in the background so the caller is not blocked.
    ///
    /// Returns `None` when the event is not configured to notify. After
    /// [`abort`](Self::abort), non-failure deliveries resolve to
    /// [`NotifyOutcome::Cancelled`]; failure deliveries are still attempted.
    pub fn spawn(
        &self,
        event: LifecycleEvent,
        context: RunContext,
    ) -> Option<JoinHandle<NotifyOutcome>> {
        if !self.inner.config.should_notify(event, &context) {
            debug!(%event, job = %context.job, "notification not configured for event");
            return None;
        }

        let inner = Arc::clone(&self.inner);
        let cancel = self.cancel.clone();
        Some(self.tracker.spawn(async move {
            if event == LifecycleEvent::Failure {
                return inner.deliver(event, &context).await;
            }
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(%event, job = %context.job, "background notification cancelled");
                    NotifyOutcome::Cancelled
                }
                outcome = inner.deliver(event, &context) => outcome,
            }
        }))
    }

    /// Number of background deliveries still running.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Cancel pending background deliveries, except failure notifications,
    /// which are still attempted on a best-effort basis.
    pub fn abort(&self) {
        info!(pending = self.tracker.len(), "aborting pending notifications");
        self.cancel.cancel();
    }

    /// Longest a single delivery can take with the current executor settings.
    ///
    /// A good default for [`shutdown`](Self::shutdown): once it elapses,
    /// anything still pending is stuck outside the executor's control.
    pub fn shutdown_grace(&self) -> Duration {
        self.inner.executor.config().max_total_duration()
    }

    /// Wait up to `grace` for background deliveries to finish.
    ///
    /// Returns `true` if everything drained in time.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let drained = tokio::time::timeout(grace, self.tracker.wait()).await.is_ok();
        if drained {
            info!("notifier shutdown complete");
        } else {
            warn!(
                pending = self.tracker.len(),
                grace_ms = %grace.as_millis(),
                "notifier shutdown timed out with deliveries still pending"
            );
        }
        drained
    }
}
