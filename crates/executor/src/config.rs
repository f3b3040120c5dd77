use std::time::Duration;

/// Configuration for the [`DispatchExecutor`](crate::DispatchExecutor).
///
/// Retries back off exponentially: the delay before retry `n` (zero-based)
/// is `retry_base_delay * 2^n`, capped at `retry_max_delay`. Setting both
/// delays to the same value gives a constant delay.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use dqnotify_executor::ExecutorConfig;
///
/// let config = ExecutorConfig::default();
/// assert_eq!(config.max_retries, 3);
/// assert_eq!(config.execution_timeout, Duration::from_secs(10));
/// assert_eq!(config.retry_delay(1), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Retries after the first attempt. Zero means a single attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub retry_base_delay: Duration,
    /// Upper bound on any single backoff delay. Notifications must not hold
    /// up the run, so the default is short.
    pub retry_max_delay: Duration,
    /// Upper bound on a single dispatcher call.
    pub execution_timeout: Duration,
    /// Maximum number of deliveries in flight at once.
    pub max_concurrent: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_secs(5),
            execution_timeout: Duration::from_secs(10),
            max_concurrent: 4,
        }
    }
}

impl ExecutorConfig {
    /// Backoff before the zero-based `retry`.
    pub fn retry_delay(&self, retry: u32) -> Duration {
        let factor = 1_u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.retry_max_delay)
    }

    /// Worst-case wall-clock time for one delivery, counting every attempt
    /// and every backoff delay.
    ///
    /// The notifier uses this as its default shutdown grace period.
    pub fn max_total_duration(&self) -> Duration {
        (0..self.max_retries).fold(self.execution_timeout, |total, retry| {
            total + self.retry_delay(retry) + self.execution_timeout
        })
    }
}
