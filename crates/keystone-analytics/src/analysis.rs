//! The full analysis pipeline for one set of parameters.
//!
//! ```text
//! Parameters -> loan legs -> CostBreakdown -> sale price -> ROI -> payback
//! ```

use keystone_core::types::{AnalysisResult, Parameters, PaybackPeriod};
use serde::{Deserialize, Serialize};

use crate::aggregate::{legs, CostBreakdown, ModelLeg};
use crate::returns::{monthly_roi, payback_period, roi, sale_price};

/// Everything computed for one set of parameters.
///
/// Richer than [`AnalysisResult`]: it keeps the per-leg figures that the
/// results screen shows but a saved simulation does not store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The parameters analysed.
    pub parameters: Parameters,
    /// Each loan leg at the sale horizon.
    pub legs: Vec<ModelLeg>,
    /// Aggregated figures over all legs.
    pub breakdown: CostBreakdown,
    /// Sale price.
    pub sale_price: f64,
    /// Sale price minus total costs.
    pub net_profit: f64,
    /// Return on the initial investment, in percent.
    pub roi: f64,
    /// ROI per month, in percent.
    pub monthly_roi: f64,
    /// Time to recover the initial investment.
    pub payback: PaybackPeriod,
}

impl Analysis {
    /// Cash put in upfront.
    #[must_use]
    pub fn initial_investment(&self) -> f64 {
        self.breakdown.down_payments
    }

    /// Total cost up to the sale.
    #[must_use]
    pub fn total_costs(&self) -> f64 {
        self.breakdown.total_costs
    }

    /// Converts into an unsaved [`AnalysisResult`].
    #[must_use]
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            identity: None,
            model_type: self.parameters.model_type(),
            parameters: self.parameters,
            initial_investment: self.breakdown.down_payments,
            total_investment: self.breakdown.total_costs,
            total_revenue: self.sale_price,
            net_profit: self.net_profit,
            roi: self.roi,
            monthly_roi: self.monthly_roi,
            monthly_payment: self.breakdown.monthly_payment,
            remaining_debt: self.breakdown.remaining_debt,
            payback: self.payback,
        }
    }
}

/// Runs the whole pipeline on sanitised parameters.
///
/// # Example
///
/// ```
/// use keystone_analytics::analyze;
/// use keystone_core::types::{ModelType, Parameters};
///
/// let analysis = analyze(&Parameters::default_for(ModelType::LandAndBuild));
/// // All cash, 60% margin: 90k profit on 150k invested
/// assert_eq!(analysis.net_profit, 90_000.0);
/// assert_eq!(analysis.roi, 60.0);
/// assert_eq!(analysis.payback.to_string(), "3 years and 4 months");
/// ```
#[must_use]
pub fn analyze(params: &Parameters) -> Analysis {
    let legs = legs(params);
    let breakdown = CostBreakdown::from_legs(params.total_value(), &legs);

    let costs = breakdown.total_costs;
    let revenue = sale_price(costs, params.profit_margin());
    let roi = roi(revenue, costs, breakdown.down_payments);
    let timeframe = params.timeframe();

    log::debug!(
        "analyzed {} over {} months: costs {:.2}, revenue {:.2}, roi {:.2}%",
        params.model_type(),
        timeframe,
        costs,
        revenue,
        roi
    );

    Analysis {
        parameters: *params,
        legs,
        breakdown,
        sale_price: revenue,
        net_profit: revenue - costs,
        roi,
        monthly_roi: monthly_roi(roi, timeframe),
        payback: payback_period(roi, timeframe),
    }
}

/// Recomputes the figures of a result from its stored parameters, keeping
/// its identity.
#[must_use]
pub fn recompute(result: &AnalysisResult) -> AnalysisResult {
    let fresh = analyze(&result.parameters).into_result();
    AnalysisResult {
        identity: result.identity.clone(),
        ..fresh
    }
}
