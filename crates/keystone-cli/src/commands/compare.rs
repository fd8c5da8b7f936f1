//! Compare command implementation.
//!
//! Projects saved simulations over a common horizon: a short deal can be
//! repeated more often than a long one before the horizon ends.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use keystone_analytics::{compare_over, BatchConfig, Comparison};
use keystone_core::format::{format_currency, format_percent};
use keystone_core::types::AnalysisResult;
use keystone_storage::SimulationStore;

use crate::cli::OutputFormat;
use crate::commands::{resolve_id, Context};
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_single, KeyValue};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Simulation ids or unique id prefixes
    pub ids: Vec<String>,

    /// Compare every saved simulation
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    /// Horizon in months (defaults to the longest timeframe)
    #[arg(long)]
    pub horizon: Option<u32>,
}

/// One simulation projected over the horizon.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProjectionRow {
    #[tabled(rename = "Simulation")]
    pub name: String,
    #[tabled(rename = "Timeframe")]
    pub timeframe: String,
    #[tabled(rename = "Transactions")]
    pub transactions: u32,
    #[tabled(rename = "ROI per deal")]
    pub roi: String,
    #[tabled(rename = "Total ROI")]
    pub total_roi: String,
    #[tabled(rename = "Total profit")]
    pub total_profit: String,
    #[tabled(rename = "Avg monthly ROI")]
    pub average_monthly_roi: String,
}

/// Accumulated results of one simulation at the end of a year.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Simulation")]
    pub name: String,
    #[tabled(rename = "Transactions")]
    pub transactions: u32,
    #[tabled(rename = "Accumulated ROI")]
    pub accumulated_roi: String,
    #[tabled(rename = "Accumulated profit")]
    pub accumulated_profit: String,
}

fn projection_rows(cmp: &Comparison) -> Vec<ProjectionRow> {
    cmp.projections
        .iter()
        .map(|p| ProjectionRow {
            name: p.name.clone(),
            timeframe: format!("{} months", p.timeframe),
            transactions: p.transactions,
            roi: format_percent(p.roi_per_transaction),
            total_roi: format_percent(p.total_roi),
            total_profit: format_currency(p.total_profit),
            average_monthly_roi: format_percent(p.average_monthly_roi),
        })
        .collect()
}

fn year_rows(cmp: &Comparison) -> Vec<YearRow> {
    cmp.yearly
        .iter()
        .flat_map(|y| {
            y.entries.iter().map(move |e| YearRow {
                year: y.year,
                name: e.name.clone(),
                transactions: e.transactions,
                accumulated_roi: format_percent(e.accumulated_roi),
                accumulated_profit: format_currency(e.accumulated_profit),
            })
        })
        .collect()
}

fn detail_rows(cmp: &Comparison, index: usize) -> Vec<KeyValue> {
    let Some(d) = cmp.details.get(index) else {
        return Vec::new();
    };
    vec![
        KeyValue::new("Model", d.model_type.label()),
        KeyValue::new("Timeframe", format!("{} months", d.timeframe)),
        KeyValue::percent("Profit margin", d.profit_margin),
        KeyValue::money("Total value", d.breakdown.total_value),
        KeyValue::money("Down payments", d.breakdown.down_payments),
        KeyValue::money("Financed", d.breakdown.financed),
        KeyValue::money("Monthly payment", d.breakdown.monthly_payment),
        KeyValue::money("Total interest", d.breakdown.interest),
        KeyValue::money("Total costs", d.total_investment),
        KeyValue::money("Sale price", d.total_revenue),
        KeyValue::money("Net profit", d.net_profit),
        KeyValue::percent("ROI", d.roi),
        KeyValue::percent("Monthly ROI", d.monthly_roi),
    ]
}

fn select(storage: &dyn SimulationStore, args: &CompareArgs) -> Result<Vec<AnalysisResult>> {
    if args.all {
        return Ok(storage.list()?);
    }
    if args.ids.is_empty() {
        return Err(CliError::MissingArgument("simulation ids (or --all)".into()).into());
    }
    args.ids.iter().map(|id| resolve_id(storage, id)).collect()
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let selected = select(&storage, &args)?;

    let horizon = match args.horizon {
        Some(h) => h,
        None => selected.iter().map(AnalysisResult::timeframe).max().unwrap_or(0),
    };
    let config = BatchConfig::default().with_threshold(ctx.settings.parallel_threshold);
    let cmp = compare_over(&selected, horizon, &config)?;

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("Comparison over {} months", cmp.horizon));
            print_output(&projection_rows(&cmp), ctx.format)?;
            print_header("Yearly Progression");
            print_output(&year_rows(&cmp), ctx.format)?;
            for (i, detail) in cmp.details.iter().enumerate() {
                print_header(&detail.name);
                print_output(&detail_rows(&cmp, i), ctx.format)?;
            }
            if let (Some(best), false) = (cmp.best_by_total_roi(), ctx.quiet) {
                print_info(&format!(
                    "Highest total ROI: {} ({})",
                    best.name,
                    format_percent(best.total_roi)
                ));
            }
        }
        OutputFormat::Json => print_single(&cmp)?,
        OutputFormat::Csv => print_output(&projection_rows(&cmp), ctx.format)?,
        OutputFormat::Minimal => {
            if let Some(best) = cmp.best_by_total_roi() {
                println!("{}", best.name);
            }
        }
    }
    Ok(())
}
