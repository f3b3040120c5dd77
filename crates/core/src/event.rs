use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discrete point in a data-quality run at which a notification may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The run started.
    Start,
    /// The run finished successfully.
    Completion,
    /// The run failed.
    Failure,
    /// The observed error drop percentage reached the configured threshold.
    ErrorDropThresholdBreach,
    /// A rule whose failure action is `ignore` failed.
    IgnoredRuleFailed,
}

impl LifecycleEvent {
    /// Every lifecycle event, in run order.
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Completion,
        Self::Failure,
        Self::ErrorDropThresholdBreach,
        Self::IgnoredRuleFailed,
    ];

    /// Returns the event name in `snake_case`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Completion => "completion",
            Self::Failure => "failure",
            Self::ErrorDropThresholdBreach => "error_drop_threshold_breach",
            Self::IgnoredRuleFailed => "ignored_rule_failed",
        }
    }

    /// Short human-readable title used in rendered messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Start => "run started",
            Self::Completion => "run completed",
            Self::Failure => "run failed",
            Self::ErrorDropThresholdBreach => "error drop threshold breached",
            Self::IgnoredRuleFailed => "ignored rule failed",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == normalized)
            .ok_or_else(|| format!("unknown lifecycle event: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_kebab_and_snake_case() {
        assert_eq!(
            "error-drop-threshold-breach".parse::<LifecycleEvent>().unwrap(),
            LifecycleEvent::ErrorDropThresholdBreach
        );
        assert_eq!(
            "Ignored_Rule_Failed".parse::<LifecycleEvent>().unwrap(),
            LifecycleEvent::IgnoredRuleFailed
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "finish".parse::<LifecycleEvent>().unwrap_err();
        assert!(err.contains("finish"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for event in LifecycleEvent::ALL {
            assert_eq!(event.to_string().parse::<LifecycleEvent>().unwrap(), event);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&LifecycleEvent::Failure).unwrap();
        assert_eq!(json, "\"failure\"");
    }
}
