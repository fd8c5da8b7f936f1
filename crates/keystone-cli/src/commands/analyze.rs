//! Analyze command implementation.
//!
//! Collects model parameters from flags, falls back to the last-used values
//! and then to the model defaults, and renders the analysis.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use keystone_analytics::{analyze, ModelLeg};
use keystone_core::format::{format_currency, format_percent};
use keystone_core::types::{AnalysisResult, FinancingTerms, ModelType, Parameters};
use keystone_storage::{ParameterStore, SimulationStore};

use crate::cli::OutputFormat;
use crate::commands::{parse_money, Context};
use crate::output::{print_header, print_output, print_single, print_success, print_warning, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub model: ModelCommand,

    /// Save the result as a simulation with this name
    #[arg(long, global = true, value_name = "NAME")]
    pub save: Option<String>,

    /// Ignore last-used values and start from the model defaults
    #[arg(long, global = true)]
    pub fresh: bool,
}

/// Investment models.
#[derive(Subcommand, Debug)]
pub enum ModelCommand {
    /// Model 1: buy a property and renovate it
    #[command(name = "model1", alias = "renovate")]
    Model1(Model1Args),

    /// Model 2: buy land and build
    #[command(name = "model2", alias = "build")]
    Model2(Model2Args),
}

/// Flags shared by both models.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Months until the sale
    #[arg(short, long)]
    pub timeframe: Option<u32>,

    /// Profit margin over total costs, in percent
    #[arg(short, long)]
    pub margin: Option<f64>,
}

/// Financing flags of one loan leg.
#[derive(Args, Debug, Default)]
pub struct TermsArgs {
    /// Down payment, in percent of the value
    #[arg(long)]
    pub down: Option<f64>,

    /// Annual interest rate, in percent
    #[arg(long)]
    pub rate: Option<f64>,

    /// Loan term, in years
    #[arg(long)]
    pub term: Option<u32>,
}

impl TermsArgs {
    fn apply(&self, terms: &mut FinancingTerms) {
        if let Some(down) = self.down {
            terms.down_payment_pct = down;
        }
        if let Some(rate) = self.rate {
            terms.annual_rate_pct = rate;
        }
        if let Some(term) = self.term {
            terms.term_years = term;
        }
    }
}

/// Arguments for Model 1.
#[derive(Args, Debug, Default)]
pub struct Model1Args {
    /// Purchase price of the property
    #[arg(long, value_parser = parse_money)]
    pub property_value: Option<f64>,

    /// Cost of the renovation
    #[arg(long, value_parser = parse_money)]
    pub renovation_cost: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Property down payment, in percent
    #[arg(long)]
    pub property_down: Option<f64>,

    /// Property loan annual rate, in percent
    #[arg(long)]
    pub property_rate: Option<f64>,

    /// Property loan term, in years
    #[arg(long)]
    pub property_term: Option<u32>,

    /// Renovation down payment, in percent
    #[arg(long)]
    pub renovation_down: Option<f64>,

    /// Renovation loan annual rate, in percent
    #[arg(long)]
    pub renovation_rate: Option<f64>,

    /// Renovation loan term, in years
    #[arg(long)]
    pub renovation_term: Option<u32>,
}

/// Arguments for Model 2.
#[derive(Args, Debug, Default)]
pub struct Model2Args {
    /// Purchase price of the land
    #[arg(long, value_parser = parse_money)]
    pub land_value: Option<f64>,

    /// Cost of construction
    #[arg(long, value_parser = parse_money)]
    pub construction_cost: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub financing: TermsArgs,
}

impl ModelCommand {
    fn model_type(&self) -> ModelType {
        match self {
            ModelCommand::Model1(_) => ModelType::BuyAndRenovate,
            ModelCommand::Model2(_) => ModelType::LandAndBuild,
        }
    }

    /// Overlays the given flags on `base`.
    ///
    /// `base` must belong to the same model; a mismatched base is replaced
    /// by the model defaults first.
    pub fn merge(&self, base: Parameters) -> Parameters {
        let base = if base.model_type() == self.model_type() {
            base
        } else {
            Parameters::default_for(self.model_type())
        };

        match (self, base) {
            (ModelCommand::Model1(args), Parameters::BuyAndRenovate(mut p)) => {
                if let Some(v) = args.property_value {
                    p.property_value = v;
                }
                if let Some(v) = args.renovation_cost {
                    p.renovation_cost = v;
                }
                if let Some(v) = args.common.timeframe {
                    p.timeframe = v;
                }
                if let Some(v) = args.common.margin {
                    p.profit_margin = v;
                }
                TermsArgs {
                    down: args.property_down,
                    rate: args.property_rate,
                    term: args.property_term,
                }
                .apply(&mut p.property);
                TermsArgs {
                    down: args.renovation_down,
                    rate: args.renovation_rate,
                    term: args.renovation_term,
                }
                .apply(&mut p.renovation);
                Parameters::BuyAndRenovate(p)
            }
            (ModelCommand::Model2(args), Parameters::LandAndBuild(mut p)) => {
                if let Some(v) = args.land_value {
                    p.land_value = v;
                }
                if let Some(v) = args.construction_cost {
                    p.construction_cost = v;
                }
                if let Some(v) = args.common.timeframe {
                    p.timeframe = v;
                }
                if let Some(v) = args.common.margin {
                    p.profit_margin = v;
                }
                args.financing.apply(&mut p.financing);
                Parameters::LandAndBuild(p)
            }
            (_, other) => other,
        }
    }
}

/// One loan leg in the results table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct LegRow {
    #[tabled(rename = "Leg")]
    pub leg: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Down payment")]
    pub down_payment: String,
    #[tabled(rename = "Financed")]
    pub financed: String,
    #[tabled(rename = "Installment")]
    pub installment: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Balance at sale")]
    pub balance: String,
}

impl From<&ModelLeg> for LegRow {
    fn from(l: &ModelLeg) -> Self {
        Self {
            leg: l.kind.label().to_string(),
            value: format_currency(l.leg.asset_value),
            down_payment: format_currency(l.figures.down_payment),
            financed: format_currency(l.figures.principal),
            installment: format_currency(l.figures.installment),
            interest: format_currency(l.figures.interest),
            balance: format_currency(l.figures.remaining_balance),
        }
    }
}

/// Key figures of a result, in display order.
pub fn result_rows(result: &AnalysisResult) -> Vec<KeyValue> {
    let mut rows = Vec::new();
    if let Some(identity) = &result.identity {
        rows.push(KeyValue::new("Name", identity.name.clone()));
        rows.push(KeyValue::new("Id", identity.id.to_string()));
        rows.push(KeyValue::new(
            "Saved",
            identity.date.format("%Y-%m-%d %H:%M UTC").to_string(),
        ));
    }
    rows.push(KeyValue::new("Model", result.model_type.label()));
    rows.push(KeyValue::new("Timeframe", format!("{} months", result.timeframe())));
    rows.push(KeyValue::money("Total value", result.parameters.total_value()));
    rows.push(KeyValue::money("Initial investment", result.initial_investment));
    rows.push(KeyValue::money("Monthly payment", result.monthly_payment));
    rows.push(KeyValue::money("Remaining debt", result.remaining_debt));
    rows.push(KeyValue::money("Total costs", result.total_investment));
    rows.push(KeyValue::money("Sale price", result.total_revenue));
    rows.push(KeyValue::money("Net profit", result.net_profit));
    rows.push(KeyValue::percent("ROI", result.roi));
    rows.push(KeyValue::percent("Monthly ROI", result.monthly_roi));
    rows.push(KeyValue::new("Payback", result.payback.to_string()));
    rows
}

/// Renders a result together with its loan legs.
pub fn render(result: &AnalysisResult, legs: &[ModelLeg], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let title = match &result.identity {
                Some(identity) => format!("{}: {}", identity.name, result.model_type.label()),
                None => format!("Model {}: {}", result.model_type.number(), result.model_type.label()),
            };
            print_header(&title);
            print_output(&result_rows(result), format)?;
            print_header("Financing");
            let rows: Vec<LegRow> = legs.iter().map(LegRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_single(result)?,
        OutputFormat::Csv => print_output(&result_rows(result), format)?,
        OutputFormat::Minimal => println!("{}", format_percent(result.roi)),
    }
    Ok(())
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let model = args.model.model_type();
    let storage = ctx.open_storage()?;

    let base = if args.fresh {
        Parameters::default_for(model)
    } else {
        storage.load_or_default(model)?
    };

    let requested = args.model.merge(base);
    let params = requested.sanitized();
    if params != requested && !ctx.quiet {
        print_warning("Some values were out of range and have been clamped");
    }

    let analysis = analyze(&params);
    let legs = analysis.legs.clone();
    storage.save_parameters(&params)?;

    let mut result = analysis.into_result();
    if let Some(name) = args.save.as_deref() {
        result = storage.save(name, result)?;
    }

    render(&result, &legs, ctx.format)?;

    if let (Some(id), true) = (result.id(), ctx.chatty()) {
        print_success(&format!("Saved as {}", id));
    }
    Ok(())
}
