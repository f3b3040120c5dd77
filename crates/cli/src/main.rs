//! dqnotify CLI
//!
//! Validate notification option files and check which lifecycle events
//! would notify.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// dqnotify: inspect data-quality notification settings.
#[derive(Parser, Debug)]
#[command(name = "dqnotify", version, about)]
struct Cli {
    /// Path to the TOML option file.
    #[arg(
        short,
        long,
        env = "DQNOTIFY_CONFIG",
        default_value = "notifications.toml",
        global = true
    )]
    config: String,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the option file and print the resolved settings.
    Validate,
    /// Decide whether an event notifies and render its message.
    Evaluate(commands::evaluate::EvaluateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate => commands::validate::run(&cli.config, &cli.format),
        Command::Evaluate(args) => commands::evaluate::run(&cli.config, &args, &cli.format).await,
    }
}
