//! albumshift entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not tear the progress bar on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let mut config = config::Config::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_overrides(&cli.overrides());
    tracing::debug!(user_id = %config.user_id, folder = %config.destination_folder, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config, cli.command))
}
