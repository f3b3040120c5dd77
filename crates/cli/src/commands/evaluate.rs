use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use dqnotify_core::{LifecycleEvent, NotificationConfig, RunContext};
use dqnotify_dispatcher::LogDispatcher;
use dqnotify_notifier::{NotifierBuilder, NotifyOutcome};
use tracing::warn;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Lifecycle event (start, completion, failure, error-drop-threshold-breach,
    /// ignored-rule-failed).
    #[arg(long)]
    pub event: LifecycleEvent,
    /// Job or product identifier.
    #[arg(long)]
    pub job: String,
    /// Target table.
    #[arg(long)]
    pub table: Option<String>,
    /// Deployment environment.
    #[arg(long, default_value = "default")]
    pub environment: String,
    /// Run identifier.
    #[arg(long)]
    pub run_id: Option<String>,
    /// Observed error drop percentage.
    #[arg(long)]
    pub observed: Option<f64>,
    /// Failed rule name (repeatable).
    #[arg(long = "failed-rule")]
    pub failed_rules: Vec<String>,
    /// Failure description.
    #[arg(long)]
    pub error: Option<String>,
    /// Send through the log dispatcher instead of only printing.
    #[arg(long)]
    pub dispatch: bool,
}

impl EvaluateArgs {
    fn context(&self) -> RunContext {
        let mut ctx = RunContext::new(&self.job).with_environment(&self.environment);
        ctx.table.clone_from(&self.table);
        ctx.run_id.clone_from(&self.run_id);
        ctx.observed_error_drop_percent = self.observed;
        ctx.failed_rules.clone_from(&self.failed_rules);
        ctx.error.clone_from(&self.error);
        ctx
    }
}

pub async fn run(
    config_path: &str,
    args: &EvaluateArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let config = NotificationConfig::from_file(config_path)
        .with_context(|| format!("invalid notification options in {config_path}"))?;
    let ctx = args.context();

    let fires = config.should_notify(args.event, &ctx);
    let message = config.build_message(args.event, &ctx);

    let outcome = if args.dispatch {
        let notifier = NotifierBuilder::new()
            .config(config)
            .dispatcher(Arc::new(LogDispatcher::new("cli")))
            .build()?;
        let handle = notifier.spawn(args.event, ctx.clone());
        let drained = notifier.shutdown(notifier.shutdown_grace()).await;
        Some(match handle {
            Some(handle) if drained => handle.await?,
            Some(handle) => {
                warn!("dispatch did not finish within the grace period");
                handle.abort();
                NotifyOutcome::Cancelled
            }
            None => NotifyOutcome::Skipped,
        })
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "event": args.event,
                "fires": fires,
                "message": message,
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{}: {}", args.event, if fires { "notifies" } else { "silent" });
            if fires {
                println!("---\n{}", message.text());
            }
            if let Some(outcome) = outcome {
                println!("---\ndispatch: {outcome:?}");
            }
        }
    }
    Ok(())
}
