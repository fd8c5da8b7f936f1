//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    AnalyzeArgs, CompareArgs, ConfigArgs, DeleteArgs, ListArgs, RecomputeArgs, ShowArgs,
};

/// Keystone - Real-estate investment calculator
#[derive(Parser, Debug)]
#[command(name = "keystone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file
    #[arg(long, global = true, env = "KEYSTONE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Simulation database (overrides the configured storage path)
    #[arg(long, global = true, env = "KEYSTONE_STORE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an investment model
    Analyze(AnalyzeArgs),

    /// List saved simulations
    List(ListArgs),

    /// Show a saved simulation
    Show(ShowArgs),

    /// Delete a saved simulation
    Delete(DeleteArgs),

    /// Compare saved simulations over a common horizon
    Compare(CompareArgs),

    /// Recompute saved simulations from their parameters
    Recompute(RecomputeArgs),

    /// Manage settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["keystone", "list", "--format", "json", "-q"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::List(_)));
    }
}
