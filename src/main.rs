//! proctree CLI
//!
//! Usage: proctree <COMMAND>
//!
//! Commands:
//!   run   Simulate the work described by a plan file
//!   demo  Simulate a built-in sample build

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use proctree::config::Config;
use proctree::logging;
use proctree::ui::context::UiContext;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            (config.with_env_overrides(), warnings)
        }
        None => Config::load_or_default(std::env::current_dir().ok().as_deref()),
    };

    logging::init_with_config(&config.logging, cli.verbose).context("failed to open log file")?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let ui = UiContext::new(cli.verbose, cli.color.map(Into::into), cli.no_animation, &config);
    tracing::debug!(?ui, "resolved presentation");

    match cli.command {
        Commands::Run { plan } => commands::run::cmd_run(&plan, &config, &ui, cli.width),
        Commands::Demo => commands::run::cmd_demo(&config, &ui, cli.width),
    }
}
