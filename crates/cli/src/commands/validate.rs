use anyhow::Context;
use dqnotify_core::{LifecycleEvent, NotificationConfig};

use crate::OutputFormat;

pub fn run(config_path: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let config = NotificationConfig::from_file(config_path)
        .with_context(|| format!("invalid notification options in {config_path}"))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary(&config))?);
        }
        OutputFormat::Text => {
            println!("{config_path}: ok");
            println!(
                "slack: {}",
                if config.slack_enabled() { "enabled" } else { "disabled" }
            );
            if config.webhook_url().is_some() {
                println!("webhook: configured");
            }
            for event in LifecycleEvent::ALL {
                println!("  {event}: {}", on_off(event_flag(&config, event)));
            }
            if let Some(threshold) = config.error_drop_threshold_percent() {
                println!("error drop threshold: {threshold}%");
            }
        }
    }
    Ok(())
}

/// Whether the per-event flag is set, ignoring the master toggle.
pub(crate) fn event_flag(config: &NotificationConfig, event: LifecycleEvent) -> bool {
    match event {
        LifecycleEvent::Start => config.notify_on_start(),
        LifecycleEvent::Completion => config.notify_on_completion(),
        LifecycleEvent::Failure => config.notify_on_fail(),
        LifecycleEvent::ErrorDropThresholdBreach => config.notify_on_error_drop_threshold_breach(),
        LifecycleEvent::IgnoredRuleFailed => config.notify_on_rules_action_ignore_failed(),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// JSON view of the resolved settings. The webhook URL is never printed.
fn summary(config: &NotificationConfig) -> serde_json::Value {
    let events: serde_json::Map<String, serde_json::Value> = LifecycleEvent::ALL
        .into_iter()
        .map(|event| (event.to_string(), event_flag(config, event).into()))
        .collect();
    serde_json::json!({
        "slack_enabled": config.slack_enabled(),
        "webhook_configured": config.webhook_url().is_some(),
        "events": events,
        "error_drop_threshold_percent": config.error_drop_threshold_percent(),
    })
}
