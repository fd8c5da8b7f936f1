//! Keystone CLI - Command-line interface for real-estate investment analysis.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a buy-and-renovate deal and save it
//! keystone analyze model1 --property-value "180 000" --property-down 25 --save "Porto flat"
//!
//! # Analyze a land-and-build deal (omitted flags reuse the last values)
//! keystone analyze model2 --land-value 60000 --construction-cost 140000 --timeframe 18
//!
//! # List, compare and inspect saved simulations
//! keystone list
//! keystone compare 3f2a 9b1c
//! keystone show 3f2a --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::{default_settings_path, Settings};

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,keystone=debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.into());

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings_path = match cli.config {
        Some(path) => path,
        None => default_settings_path()?,
    };
    let settings = Settings::load(&settings_path)?;
    tracing::debug!("loaded settings from {}", settings_path.display());

    if !settings.use_colors {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format.unwrap_or(settings.default_format),
        quiet: cli.quiet,
        settings,
        settings_path,
        store_override: cli.store,
    };

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::List(args) => commands::simulation::execute_list(args, &ctx)?,
        Commands::Show(args) => commands::simulation::execute_show(args, &ctx)?,
        Commands::Delete(args) => commands::simulation::execute_delete(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Recompute(args) => commands::recompute::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
