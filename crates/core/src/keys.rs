//! Recognized notification option keys.
//!
//! Every key that [`NotificationConfig::build`](crate::NotificationConfig::build)
//! understands is listed here. Keys not in [`ALL`] are ignored.

/// Master toggle for Slack notifications (boolean).
pub const ENABLE_SLACK: &str = "se_notifications_enable_slack";

/// Slack incoming-webhook URL (string).
pub const SLACK_WEBHOOK_URL: &str = "se_notifications_slack_webhook_url";

/// Notify when a run starts (boolean).
pub const ON_START: &str = "se_notifications_on_start";

/// Notify when a run completes (boolean).
pub const ON_COMPLETION: &str = "se_notifications_on_completion";

/// Notify when a run fails (boolean).
pub const ON_FAIL: &str = "se_notifications_on_fail";

/// Notify when the error drop percentage reaches the threshold (boolean).
pub const ON_ERROR_DROP_THRESHOLD_BREACH: &str =
    "se_notifications_on_error_drop_exceeds_threshold_breach";

/// Notify when a rule whose failure action is `ignore` fails (boolean).
pub const ON_RULES_ACTION_IGNORE_FAILED: &str =
    "se_notifications_on_rules_action_if_failed_set_ignore";

/// Error drop threshold as a percentage in `[0, 100]` (numeric).
pub const ERROR_DROP_THRESHOLD: &str = "se_notifications_on_error_drop_threshold";

/// All recognized keys.
pub const ALL: [&str; 8] = [
    ENABLE_SLACK,
    SLACK_WEBHOOK_URL,
    ON_START,
    ON_COMPLETION,
    ON_FAIL,
    ON_ERROR_DROP_THRESHOLD_BREACH,
    ON_RULES_ACTION_IGNORE_FAILED,
    ERROR_DROP_THRESHOLD,
];

/// Returns `true` if `key` is one of the recognized option keys.
pub fn is_recognized(key: &str) -> bool {
    ALL.contains(&key)
}
