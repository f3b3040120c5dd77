use std::sync::Arc;

use dqnotify_core::NotificationMessage;
use dqnotify_dispatcher::{DispatchError, DynDispatcher};
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use crate::config::ExecutorConfig;
use crate::outcome::{DispatchFailure, DispatchOutcome};

/// Delivers notifications through a dispatcher with a per-attempt timeout,
/// bounded retries, and bounded concurrency.
///
/// The executor never returns an error and never waits longer than
/// [`ExecutorConfig::max_total_duration`] once it holds a permit: a slow or
/// broken webhook cannot stall the data-quality run.
pub struct DispatchExecutor {
    config: ExecutorConfig,
    semaphore: Arc<Semaphore>,
}

impl DispatchExecutor {
    /// # Examples
    ///
    /// ```
    /// use dqnotify_executor::{DispatchExecutor, ExecutorConfig};
    ///
    /// let executor = DispatchExecutor::new(ExecutorConfig::default());
    /// assert_eq!(executor.config().max_concurrent, 4);
    /// ```
    pub fn new(config: ExecutorConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent.max(1)));
        Self { config, semaphore }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Deliver `message` to `webhook_url` through `dispatcher`.
    ///
    /// Retryable errors (timeouts, connection failures, rate limiting) are
    /// retried up to [`ExecutorConfig::max_retries`] times with delays from
    /// the retry strategy. Anything else fails immediately.
    #[instrument(
        skip(self, webhook_url, message, dispatcher),
        fields(event = %message.event, dispatcher = dispatcher.name(), attempt)
    )]
    pub async fn execute(
        &self,
        webhook_url: &str,
        message: &NotificationMessage,
        dispatcher: &dyn DynDispatcher,
    ) -> DispatchOutcome {
        // Cancel-safe: dropping the future while waiting never takes a permit.
        let Ok(_permit) = self.semaphore.acquire().await else {
            return DispatchOutcome::Failed(DispatchFailure {
                code: "CLOSED".into(),
                message: "executor is shut down".into(),
                retryable: false,
                attempts: 0,
            });
        };

        let mut attempt = 0;
        loop {
            tracing::Span::current().record("attempt", attempt);
            debug!(attempt, max_retries = self.config.max_retries, "dispatching notification");

            let err = match tokio::time::timeout(
                self.config.execution_timeout,
                dispatcher.send(webhook_url, message),
            )
            .await
            {
                Ok(Ok(())) => {
                    debug!(attempt, "notification delivered");
                    return DispatchOutcome::Delivered {
                        attempts: attempt + 1,
                    };
                }
                Ok(Err(err)) => err,
                Err(_elapsed) => DispatchError::Timeout(self.config.execution_timeout),
            };

            if err.is_retryable() && attempt < self.config.max_retries {
                let delay = self.config.retry_delay(attempt);
                warn!(
                    attempt,
                    error = %err,
                    delay_ms = %delay.as_millis(),
                    "retryable dispatch error, will retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            warn!(
                attempt,
                error = %err,
                retryable = err.is_retryable(),
                "notification delivery failed"
            );
            return DispatchOutcome::Failed(DispatchFailure {
                code: err.code().to_owned(),
                message: err.to_string(),
                retryable: err.is_retryable(),
                attempts: attempt + 1,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unnecessary_literal_bound)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use dqnotify_core::{LifecycleEvent, NotificationConfig, RunContext};
    use tokio::sync::Barrier;

    use super::*;

    const URL: &str = "https://hooks.slack.com/services/T/B/X";

    struct MockDispatcher {
        error: Option<fn() -> DispatchError>,
        calls: AtomicU32,
    }

    impl MockDispatcher {
        fn success() -> Self {
            Self {
                error: None,
                calls: AtomicU32::new(0),
            }
        }

        fn failing(error: fn() -> DispatchError) -> Self {
            Self {
                error: Some(error),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl DynDispatcher for MockDispatcher {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, _url: &str, _msg: &NotificationMessage) -> Result<(), DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    /// Fails the first N calls with a connection error, then succeeds.
    struct FlakyDispatcher {
        failures_left: AtomicU32,
    }

    #[async_trait]
    impl DynDispatcher for FlakyDispatcher {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn send(&self, _url: &str, _msg: &NotificationMessage) -> Result<(), DispatchError> {
            let remaining = self.failures_left.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_left.store(remaining - 1, Ordering::SeqCst);
                Err(DispatchError::Connection("flaky".into()))
            } else {
                Ok(())
            }
        }
    }

    struct SlowDispatcher;

    #[async_trait]
    impl DynDispatcher for SlowDispatcher {
        fn name(&self) -> &str {
            "slow"
        }

        async fn send(&self, _url: &str, _msg: &NotificationMessage) -> Result<(), DispatchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    struct BarrierDispatcher {
        count: Arc<AtomicU32>,
        barrier: Arc<Barrier>,
    }

    #[async_trait]
    impl DynDispatcher for BarrierDispatcher {
        fn name(&self) -> &str {
            "barrier"
        }

        async fn send(&self, _url: &str, _msg: &NotificationMessage) -> Result<(), DispatchError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.barrier.wait().await;
            Ok(())
        }
    }

    fn message() -> NotificationMessage {
        NotificationConfig::default()
            .build_message(LifecycleEvent::Failure, &RunContext::new("orders_dq"))
    }

    fn fast_config() -> ExecutorConfig {
        ExecutorConfig {
            max_retries: 3,
            retry_base_delay: Duration::from_millis(1),
            retry_max_delay: Duration::from_millis(1),
            execution_timeout: Duration::from_secs(5),
            max_concurrent: 10,
        }
    }

    #[tokio::test]
    async fn delivers_on_first_attempt() {
        let executor = DispatchExecutor::new(fast_config());
        let dispatcher = MockDispatcher::success();
        let outcome = executor.execute(URL, &message(), &dispatcher).await;
        assert_eq!(outcome, DispatchOutcome::Delivered { attempts: 1 });
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_retryable_error_fails_immediately() {
        let executor = DispatchExecutor::new(fast_config());
        let dispatcher = MockDispatcher::failing(|| DispatchError::Rejected("invalid_payload".into()));
        let outcome = executor.execute(URL, &message(), &dispatcher).await;
        match outcome {
            DispatchOutcome::Failed(failure) => {
                assert_eq!(failure.code, "REJECTED");
                assert!(!failure.retryable);
                assert_eq!(failure.attempts, 1);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retryable_error_exhausts_retries() {
        let executor = DispatchExecutor::new(fast_config());
        let dispatcher = MockDispatcher::failing(|| DispatchError::RateLimited);
        let outcome = executor.execute(URL, &message(), &dispatcher).await;
        match outcome {
            DispatchOutcome::Failed(failure) => {
                assert_eq!(failure.code, "RATE_LIMITED");
                assert!(failure.retryable);
                assert_eq!(failure.attempts, 4, "1 initial + 3 retries");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let executor = DispatchExecutor::new(fast_config());
        let dispatcher = FlakyDispatcher {
            failures_left: AtomicU32::new(2),
        };
        let outcome = executor.execute(URL, &message(), &dispatcher).await;
        assert_eq!(outcome, DispatchOutcome::Delivered { attempts: 3 });
    }

    #[tokio::test]
    async fn slow_dispatcher_times_out() {
        tokio::time::pause();
        let config = ExecutorConfig {
            max_retries: 1,
            retry_base_delay: Duration::from_millis(1),
            retry_max_delay: Duration::from_millis(1),
            execution_timeout: Duration::from_millis(100),
            max_concurrent: 1,
        };
        let executor = DispatchExecutor::new(config);
        let outcome = executor.execute(URL, &message(), &SlowDispatcher).await;
        match outcome {
            DispatchOutcome::Failed(failure) => {
                assert_eq!(failure.code, "TIMEOUT");
                assert!(failure.retryable);
                assert_eq!(failure.attempts, 2);
            }
            other => panic!("expected Failed(TIMEOUT), got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_back_off_exponentially() {
        let config = ExecutorConfig {
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_millis(300),
            ..ExecutorConfig::default()
        };
        let executor = DispatchExecutor::new(config);
        let dispatcher = MockDispatcher::failing(|| DispatchError::Connection("down".into()));

        let started = tokio::time::Instant::now();
        let outcome = executor.execute(URL, &message(), &dispatcher).await;

        assert_eq!(outcome.attempts(), 4);
        // 100ms + 200ms + 300ms (capped)
        assert_eq!(started.elapsed(), Duration::from_millis(600));
    }

    #[tokio::test]
    async fn zero_concurrency_is_treated_as_one() {
        let config = ExecutorConfig {
            max_concurrent: 0,
            ..fast_config()
        };
        let executor = DispatchExecutor::new(config);
        let outcome = executor
            .execute(URL, &message(), &MockDispatcher::success())
            .await;
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn concurrent_deliveries_share_the_semaphore() {
        let config = ExecutorConfig {
            max_retries: 0,
            max_concurrent: 2,
            ..fast_config()
        };
        let executor = Arc::new(DispatchExecutor::new(config));
        let count = Arc::new(AtomicU32::new(0));
        let dispatcher = Arc::new(BarrierDispatcher {
            count: Arc::clone(&count),
            barrier: Arc::new(Barrier::new(2)),
        });

        let mut handles = Vec::new();
        for _ in 0..2 {
            let executor = Arc::clone(&executor);
            let dispatcher = Arc::clone(&dispatcher);
            handles.push(tokio::spawn(async move {
                executor.execute(URL, &message(), dispatcher.as_ref()).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_delivered());
        }
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
