//! Recompute command implementation.
//!
//! Re-runs the analysis of every saved simulation from its stored
//! parameters and writes back the figures that changed.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keystone_analytics::{recompute_all, BatchConfig};
use keystone_core::format::format_currency;
use keystone_core::types::AnalysisResult;
use keystone_storage::SimulationStore;

use crate::cli::OutputFormat;
use crate::commands::{short_id, Context};
use crate::output::{print_header, print_info, print_output, print_single, print_success};

/// Arguments for the recompute command.
#[derive(Args, Debug)]
pub struct RecomputeArgs {
    /// Report changes without writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// A simulation whose stored figures differ from a fresh analysis.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ChangeRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Stored profit")]
    pub stored_profit: String,
    #[tabled(rename = "Fresh profit")]
    pub fresh_profit: String,
}

/// Pairs each stale result with its fresh counterpart.
fn changes<'a>(
    stored: &'a [AnalysisResult],
    fresh: &'a [AnalysisResult],
) -> Vec<(&'a AnalysisResult, &'a AnalysisResult)> {
    stored
        .iter()
        .zip(fresh)
        .filter(|(old, new)| old != new)
        .collect()
}

/// Execute the recompute command.
pub fn execute(args: RecomputeArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let stored = storage.list()?;

    let config = BatchConfig::default().with_threshold(ctx.settings.parallel_threshold);
    let fresh = recompute_all(&stored, &config);
    let changed = changes(&stored, &fresh);

    if !args.dry_run {
        for (_, new) in &changed {
            storage.update(new)?;
        }
    }
    tracing::debug!(
        "recomputed {} simulations, {} changed (dry run: {})",
        stored.len(),
        changed.len(),
        args.dry_run
    );

    let rows: Vec<ChangeRow> = changed
        .iter()
        .map(|(old, new)| ChangeRow {
            id: short_id(new),
            name: new.name().to_string(),
            stored_profit: format_currency(old.net_profit),
            fresh_profit: format_currency(new.net_profit),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if rows.is_empty() {
                if !ctx.quiet {
                    print_info(&format!("All {} simulations are up to date", stored.len()));
                }
                return Ok(());
            }
            print_header("Changed Simulations");
            print_output(&rows, ctx.format)?;
            if !ctx.quiet {
                if args.dry_run {
                    print_info(&format!("{} simulations would be updated", rows.len()));
                } else {
                    print_success(&format!("Updated {} simulations", rows.len()));
                }
            }
        }
        OutputFormat::Json => print_single(&rows)?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => println!("{}", rows.len()),
    }
    Ok(())
}
