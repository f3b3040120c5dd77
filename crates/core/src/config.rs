use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::keys;
use crate::options::{RawOptions, bool_option, number_option, string_option};

/// Validated notification settings for a single data-quality run.
///
/// Built once at run start with [`NotificationConfig::build`] and immutable
/// afterwards. All trigger flags default to `false`.
///
/// # Examples
///
/// ```
/// use dqnotify_core::{NotificationConfig, RawOptions, keys};
///
/// let mut options = RawOptions::new();
/// options.insert(keys::ENABLE_SLACK.into(), true.into());
/// options.insert(keys::SLACK_WEBHOOK_URL.into(), "https://hooks.slack.com/services/T/B/X".into());
/// options.insert(keys::ON_FAIL.into(), true.into());
///
/// let config = NotificationConfig::build(&options).unwrap();
/// assert!(config.slack_enabled());
/// assert!(config.notify_on_fail());
/// assert!(!config.notify_on_start());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct NotificationConfig {
    pub(crate) slack_enabled: bool,
    pub(crate) slack_webhook_url: Option<String>,
    pub(crate) notify_on_start: bool,
    pub(crate) notify_on_completion: bool,
    pub(crate) notify_on_fail: bool,
    pub(crate) notify_on_error_drop_threshold_breach: bool,
    pub(crate) notify_on_rules_action_ignore_failed: bool,
    pub(crate) error_drop_threshold_percent: Option<f64>,
}

impl std::fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("slack_enabled", &self.slack_enabled)
            .field(
                "slack_webhook_url",
                &self.slack_webhook_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("notify_on_start", &self.notify_on_start)
            .field("notify_on_completion", &self.notify_on_completion)
            .field("notify_on_fail", &self.notify_on_fail)
            .field(
                "notify_on_error_drop_threshold_breach",
                &self.notify_on_error_drop_threshold_breach,
            )
            .field(
                "notify_on_rules_action_ignore_failed",
                &self.notify_on_rules_action_ignore_failed,
            )
            .field(
                "error_drop_threshold_percent",
                &self.error_drop_threshold_percent,
            )
            .finish()
    }
}

impl NotificationConfig {
    /// Validate raw options into a configuration.
    ///
    /// Unrecognized keys are ignored. Absent keys take their defaults.
    ///
    /// The webhook URL is only kept when Slack is enabled, and the threshold
    /// is only read and range-checked when threshold-breach notifications
    /// are enabled.
    pub fn build(options: &RawOptions) -> Result<Self, ConfigError> {
        for key in options.keys().filter(|k| !keys::is_recognized(k)) {
            debug!(key = %key, "ignoring unrecognized notification option");
        }

        let slack_enabled = bool_option(options, keys::ENABLE_SLACK, false)?;
        let notify_on_start = bool_option(options, keys::ON_START, false)?;
        let notify_on_completion = bool_option(options, keys::ON_COMPLETION, false)?;
        let notify_on_fail = bool_option(options, keys::ON_FAIL, false)?;
        let notify_on_error_drop_threshold_breach =
            bool_option(options, keys::ON_ERROR_DROP_THRESHOLD_BREACH, false)?;
        let notify_on_rules_action_ignore_failed =
            bool_option(options, keys::ON_RULES_ACTION_IGNORE_FAILED, false)?;

        let slack_webhook_url = if slack_enabled {
            match string_option(options, keys::SLACK_WEBHOOK_URL)? {
                Some(url) if !url.trim().is_empty() => Some(url.trim().to_owned()),
                _ => return Err(ConfigError::MissingWebhookUrl),
            }
        } else {
            None
        };

        let error_drop_threshold_percent = if notify_on_error_drop_threshold_breach {
            let threshold = number_option(options, keys::ERROR_DROP_THRESHOLD)?
                .ok_or(ConfigError::InvalidThreshold)?;
            if !(0.0..=100.0).contains(&threshold) {
                return Err(ConfigError::InvalidThreshold);
            }
            Some(threshold)
        } else {
            None
        };

        let config = Self {
            slack_enabled,
            slack_webhook_url,
            notify_on_start,
            notify_on_completion,
            notify_on_fail,
            notify_on_error_drop_threshold_breach,
            notify_on_rules_action_ignore_failed,
            error_drop_threshold_percent,
        };
        debug!(?config, "notification config built");
        Ok(config)
    }

    /// Parse a flat TOML document of notification options and build it.
    ///
    /// ```toml
    /// se_notifications_enable_slack = true
    /// se_notifications_slack_webhook_url = "https://hooks.slack.com/services/T/B/X"
    /// se_notifications_on_fail = true
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: RawOptions =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::build(&options)
    }

    /// Read a TOML option file and build it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// The webhook to dispatch to. `Some` only when Slack is enabled.
    pub fn webhook_url(&self) -> Option<&str> {
        if self.slack_enabled {
            self.slack_webhook_url.as_deref()
        } else {
            None
        }
    }

    pub fn slack_enabled(&self) -> bool {
        self.slack_enabled
    }

    pub fn notify_on_start(&self) -> bool {
        self.notify_on_start
    }

    pub fn notify_on_completion(&self) -> bool {
        self.notify_on_completion
    }

    pub fn notify_on_fail(&self) -> bool {
        self.notify_on_fail
    }

    pub fn notify_on_error_drop_threshold_breach(&self) -> bool {
        self.notify_on_error_drop_threshold_breach
    }

    pub fn notify_on_rules_action_ignore_failed(&self) -> bool {
        self.notify_on_rules_action_ignore_failed
    }

    /// The configured threshold. `Some` only when threshold-breach
    /// notifications are enabled.
    pub fn error_drop_threshold_percent(&self) -> Option<f64> {
        self.error_drop_threshold_percent
    }
}
