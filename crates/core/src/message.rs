use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;
use crate::context::RunContext;
use crate::event::LifecycleEvent;

/// Observed vs. configured error drop percentages for a threshold breach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDetail {
    pub observed_percent: f64,
    pub configured_percent: f64,
}

/// A notification ready to hand to a dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub environment: String,
    pub event: LifecycleEvent,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Present only for [`LifecycleEvent::ErrorDropThresholdBreach`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationConfig {
    /// Build the message for `event` from the run context.
    ///
    /// Does not consult the trigger flags; call
    /// [`should_notify`](Self::should_notify) first.
    pub fn build_message(&self, event: LifecycleEvent, context: &RunContext) -> NotificationMessage {
        let threshold = match event {
            LifecycleEvent::ErrorDropThresholdBreach => context
                .observed_error_drop_percent
                .zip(self.error_drop_threshold_percent)
                .map(|(observed_percent, configured_percent)| ThresholdDetail {
                    observed_percent,
                    configured_percent,
                }),
            _ => None,
        };

        let failed_rules = match event {
            LifecycleEvent::IgnoredRuleFailed | LifecycleEvent::Failure => {
                context.failed_rules.clone()
            }
            _ => Vec::new(),
        };

        let error = match event {
            LifecycleEvent::Failure => context.error.clone(),
            _ => None,
        };

        NotificationMessage {
            job: context.job.clone(),
            table: context.table.clone(),
            environment: context.environment.clone(),
            event,
            timestamp: context.timestamp,
            run_id: context.run_id.clone(),
            threshold,
            failed_rules,
            error,
        }
    }
}

impl NotificationMessage {
    /// Render the message as plain chat text.
    pub fn text(&self) -> String {
        let mut text = format!("[{}] {}: {}", self.environment, self.job, self.event.title());
        if let Some(ref table) = self.table {
            let _ = write!(text, "\ntable: {table}");
        }
        if let Some(ref run_id) = self.run_id {
            let _ = write!(text, "\nrun: {run_id}");
        }
        let _ = write!(text, "\ntime: {}", self.timestamp.to_rfc3339());
        if let Some(threshold) = self.threshold {
            let _ = write!(
                text,
                "\nerror drop: {:.2}% (threshold {:.2}%)",
                threshold.observed_percent, threshold.configured_percent
            );
        }
        if !self.failed_rules.is_empty() {
            let _ = write!(text, "\nfailed rules: {}", self.failed_rules.join(", "));
        }
        if let Some(ref error) = self.error {
            let _ = write!(text, "\nerror: {error}");
        }
        text
    }

    /// The JSON body an incoming webhook expects: `{"text": ...}`.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "text": self.text() })
    }
}
