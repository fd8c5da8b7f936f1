//! Saved simulation commands: list, show and delete.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keystone_analytics::legs;
use keystone_core::format::{format_currency, format_percent};
use keystone_core::types::AnalysisResult;
use keystone_storage::SimulationStore;

use crate::cli::OutputFormat;
use crate::commands::analyze::render;
use crate::commands::{resolve_id, short_id, Context};
use crate::output::{print_header, print_info, print_output, print_single, print_success};

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only simulations whose name contains this text
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Simulation id or unique id prefix
    pub id: String,
}

/// Arguments for the delete command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Simulation id or unique id prefix
    pub id: String,
}

/// One saved simulation in a listing.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SimulationRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Saved")]
    pub date: String,
    #[tabled(rename = "Net profit")]
    pub net_profit: String,
    #[tabled(rename = "ROI")]
    pub roi: String,
    #[tabled(rename = "Payback")]
    pub payback: String,
}

impl From<&AnalysisResult> for SimulationRow {
    fn from(r: &AnalysisResult) -> Self {
        Self {
            id: short_id(r),
            name: r.name().to_string(),
            model: r.model_type.label().to_string(),
            date: r
                .identity
                .as_ref()
                .map(|i| i.date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            net_profit: format_currency(r.net_profit),
            roi: format_percent(r.roi),
            payback: r.payback.to_string(),
        }
    }
}

/// Filters simulations by a case-insensitive name fragment.
fn filter_by_name(results: Vec<AnalysisResult>, fragment: Option<&str>) -> Vec<AnalysisResult> {
    match fragment {
        Some(fragment) => {
            let fragment = fragment.to_lowercase();
            results
                .into_iter()
                .filter(|r| r.name().to_lowercase().contains(&fragment))
                .collect()
        }
        None => results,
    }
}

/// Execute the list command.
pub fn execute_list(args: ListArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let results = filter_by_name(storage.list()?, args.name.as_deref());

    match ctx.format {
        OutputFormat::Json => print_single(&results)?,
        OutputFormat::Minimal => {
            for r in &results {
                if let Some(id) = r.id() {
                    println!("{}", id);
                }
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<SimulationRow> = results.iter().map(SimulationRow::from).collect();
            if ctx.format == OutputFormat::Table {
                print_header("Saved Simulations");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

/// Execute the show command.
pub fn execute_show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let result = resolve_id(&storage, &args.id)?;
    render(&result, &legs(&result.parameters), ctx.format)
}

/// Execute the delete command.
pub fn execute_delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let result = resolve_id(&storage, &args.id)?;
    let Some(id) = result.id() else {
        return Ok(());
    };

    if storage.delete(id)? {
        tracing::debug!("deleted simulation {}", id);
        if ctx.chatty() {
            print_success(&format!("Deleted '{}' ({})", result.name(), id));
        } else if !ctx.quiet && ctx.format == OutputFormat::Minimal {
            println!("{}", id);
        }
    } else if !ctx.quiet {
        print_info(&format!("'{}' was already deleted", result.name()));
    }
    Ok(())
}
