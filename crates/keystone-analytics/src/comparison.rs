//! Multi-transaction comparison of saved simulations.
//!
//! A simulation describes one buy-and-sell transaction lasting `timeframe`
//! months. Over a common horizon a short deal can be repeated more often
//! than a long one; the comparison projects ROI and profit linearly over
//! `floor(horizon / timeframe)` repetitions.

use keystone_core::types::{AnalysisResult, ModelType};
use serde::{Deserialize, Serialize};

use crate::aggregate::CostBreakdown;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::parallel::{maybe_parallel_map, BatchConfig};

/// Longest comparison horizon, in months (100 years).
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Complete transactions of length `timeframe` that fit in `horizon`.
#[must_use]
pub fn transactions_within(horizon: u32, timeframe: u32) -> u32 {
    if timeframe == 0 {
        0
    } else {
        horizon / timeframe
    }
}

/// ROI and profit of one simulation repeated over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiProjection {
    /// Simulation name.
    pub name: String,
    /// Months per transaction.
    pub timeframe: u32,
    /// Transactions completed within the horizon.
    pub transactions: u32,
    /// ROI of a single transaction, in percent.
    pub roi_per_transaction: f64,
    /// ROI over all transactions, in percent.
    pub total_roi: f64,
    /// Profit over all transactions.
    pub total_profit: f64,
    /// Total ROI spread over the horizon, in percent per month.
    pub average_monthly_roi: f64,
}

impl RoiProjection {
    /// Projects a saved result over `horizon` months.
    #[must_use]
    pub fn project(result: &AnalysisResult, horizon: u32) -> Self {
        let timeframe = result.timeframe();
        let transactions = transactions_within(horizon, timeframe);
        let total_roi = result.roi * f64::from(transactions);

        Self {
            name: result.name().to_string(),
            timeframe,
            transactions,
            roi_per_transaction: result.roi,
            total_roi,
            total_profit: result.net_profit * f64::from(transactions),
            average_monthly_roi: if horizon == 0 {
                0.0
            } else {
                total_roi / f64::from(horizon)
            },
        }
    }
}

/// Accumulated results of one simulation at the end of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyEntry {
    /// Simulation name.
    pub name: String,
    /// Transactions completed by the end of the year.
    pub transactions: u32,
    /// ROI accumulated so far, in percent.
    pub accumulated_roi: f64,
    /// Profit accumulated so far.
    pub accumulated_profit: f64,
}

/// Accumulated results of every simulation at the end of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProgress {
    /// Year number, starting at 1.
    pub year: u32,
    /// One entry per simulation, in input order.
    pub entries: Vec<YearlyEntry>,
}

/// Financing details of one simulation, recomputed from its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDetails {
    /// Simulation name.
    pub name: String,
    /// Investment model.
    pub model_type: ModelType,
    /// Months per transaction.
    pub timeframe: u32,
    /// Profit margin, in percent.
    pub profit_margin: f64,
    /// Aggregated financing figures.
    pub breakdown: CostBreakdown,
    /// Total cost to the date of sale.
    pub total_investment: f64,
    /// Sale price.
    pub total_revenue: f64,
    /// Net profit per transaction.
    pub net_profit: f64,
    /// ROI per transaction, in percent.
    pub roi: f64,
    /// ROI per month, in percent.
    pub monthly_roi: f64,
}

impl SimulationDetails {
    fn from_result(result: &AnalysisResult) -> Self {
        Self {
            name: result.name().to_string(),
            model_type: result.model_type,
            timeframe: result.timeframe(),
            profit_margin: result.parameters.profit_margin(),
            breakdown: CostBreakdown::from_parameters(&result.parameters),
            total_investment: result.total_investment,
            total_revenue: result.total_revenue,
            net_profit: result.net_profit,
            roi: result.roi,
            monthly_roi: result.monthly_roi,
        }
    }
}

/// Side-by-side comparison of saved simulations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Horizon of the projection, in months.
    pub horizon: u32,
    /// One projection per simulation, in input order.
    pub projections: Vec<RoiProjection>,
    /// Year-by-year accumulation, years `1..=ceil(horizon / 12)`.
    pub yearly: Vec<YearProgress>,
    /// Financing details per simulation, in input order.
    pub details: Vec<SimulationDetails>,
}

impl Comparison {
    /// The projection with the highest total ROI.
    #[must_use]
    pub fn best_by_total_roi(&self) -> Option<&RoiProjection> {
        self.projections
            .iter()
            .max_by(|a, b| a.total_roi.total_cmp(&b.total_roi))
    }
}

/// Compares simulations over the longest of their timeframes.
pub fn compare(results: &[AnalysisResult]) -> AnalyticsResult<Comparison> {
    let horizon = results
        .iter()
        .map(AnalysisResult::timeframe)
        .max()
        .ok_or(AnalyticsError::NothingToCompare)?;
    compare_over(results, horizon, &BatchConfig::default())
}

/// Compares simulations over an explicit horizon in months.
///
/// The horizon must lie in `1..=MAX_HORIZON_MONTHS`.
pub fn compare_over(
    results: &[AnalysisResult],
    horizon: u32,
    config: &BatchConfig,
) -> AnalyticsResult<Comparison> {
    if results.is_empty() {
        return Err(AnalyticsError::NothingToCompare);
    }
    if horizon == 0 || horizon > MAX_HORIZON_MONTHS {
        return Err(AnalyticsError::InvalidHorizon { months: horizon });
    }

    let projections: Vec<RoiProjection> = results
        .iter()
        .map(|r| RoiProjection::project(r, horizon))
        .collect();

    let years = horizon.div_ceil(12);
    let yearly = (1..=years)
        .map(|year| YearProgress {
            year,
            entries: results
                .iter()
                .map(|r| {
                    let done = transactions_within(year * 12, r.timeframe());
                    YearlyEntry {
                        name: r.name().to_string(),
                        transactions: done,
                        accumulated_roi: r.roi * f64::from(done),
                        accumulated_profit: r.net_profit * f64::from(done),
                    }
                })
                .collect(),
        })
        .collect();

    let details = maybe_parallel_map(results, config, SimulationDetails::from_result);

    log::debug!(
        "compared {} simulations over {} months",
        results.len(),
        horizon
    );

    Ok(Comparison {
        horizon,
        projections,
        yearly,
        details,
    })
}
