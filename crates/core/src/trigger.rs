use crate::config::NotificationConfig;
use crate::context::RunContext;
use crate::event::LifecycleEvent;

impl NotificationConfig {
    /// Decide whether `event` should produce a notification.
    ///
    /// The Slack master toggle is checked first: when it is off nothing
    /// fires. A threshold breach fires when the observed error drop
    /// percentage is at or above the configured threshold; a missing or NaN
    /// observation never fires.
    ///
    /// Pure and deterministic, so it can be called concurrently from any
    /// number of lifecycle callers.
    pub fn should_notify(&self, event: LifecycleEvent, context: &RunContext) -> bool {
        if !self.slack_enabled {
            return false;
        }

        match event {
            LifecycleEvent::Start => self.notify_on_start,
            LifecycleEvent::Completion => self.notify_on_completion,
            LifecycleEvent::Failure => self.notify_on_fail,
            LifecycleEvent::ErrorDropThresholdBreach => {
                self.notify_on_error_drop_threshold_breach
                    && threshold_breached(
                        context.observed_error_drop_percent,
                        self.error_drop_threshold_percent,
                    )
            }
            LifecycleEvent::IgnoredRuleFailed => self.notify_on_rules_action_ignore_failed,
        }
    }
}

fn threshold_breached(observed: Option<f64>, threshold: Option<f64>) -> bool {
    match (observed, threshold) {
        (Some(observed), Some(threshold)) => observed >= threshold,
        _ => false,
    }
}
