//! Per-model aggregation of loan legs.
//!
//! Model 1 (buy and renovate) finances the property and the renovation as
//! two independent legs, each on its own terms. Model 2 (land and build)
//! finances land plus construction as a single leg.

use keystone_core::types::Parameters;
use keystone_math::{LegFigures, LoanLeg};
use serde::{Deserialize, Serialize};

/// Which asset a loan leg finances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegKind {
    /// Model 1 property purchase.
    Property,
    /// Model 1 renovation works.
    Renovation,
    /// Model 2 land plus construction.
    LandAndConstruction,
}

impl LegKind {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LegKind::Property => "Property",
            LegKind::Renovation => "Renovation",
            LegKind::LandAndConstruction => "Land and construction",
        }
    }
}

/// A leg of an investment model with its figures at the sale horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLeg {
    /// The asset financed.
    pub kind: LegKind,
    /// The leg's definition.
    pub leg: LoanLeg,
    /// Figures after `timeframe` months.
    pub figures: LegFigures,
}

/// The loan legs of a model, without evaluating them.
#[must_use]
pub fn loan_legs(params: &Parameters) -> Vec<(LegKind, LoanLeg)> {
    match params {
        Parameters::BuyAndRenovate(p) => vec![
            (LegKind::Property, LoanLeg::new(p.property_value, p.property)),
            (
                LegKind::Renovation,
                LoanLeg::new(p.renovation_cost, p.renovation),
            ),
        ],
        Parameters::LandAndBuild(p) => vec![(
            LegKind::LandAndConstruction,
            LoanLeg::new(p.total_value(), p.financing),
        )],
    }
}

/// Every leg of the model evaluated at its timeframe.
#[must_use]
pub fn legs(params: &Parameters) -> Vec<ModelLeg> {
    let months = params.timeframe();
    loan_legs(params)
        .into_iter()
        .map(|(kind, leg)| ModelLeg {
            kind,
            leg,
            figures: leg.evaluate(months),
        })
        .collect()
}

/// Cash the investor puts in upfront: the down payments of every leg.
///
/// ```
/// use keystone_analytics::aggregate::initial_investment;
/// use keystone_core::types::{ModelType, Parameters};
///
/// let params = Parameters::default_for(ModelType::BuyAndRenovate);
/// // 20% of 120k plus 100% of 30k
/// assert_eq!(initial_investment(&params), 54_000.0);
/// ```
#[must_use]
pub fn initial_investment(params: &Parameters) -> f64 {
    loan_legs(params)
        .iter()
        .map(|(_, leg)| leg.down_payment())
        .sum()
}

/// Amount borrowed across every leg.
#[must_use]
pub fn financed_amount(params: &Parameters) -> f64 {
    loan_legs(params).iter().map(|(_, leg)| leg.principal()).sum()
}

/// Total cost of the investment up to the date of sale.
///
/// For each leg: down payment + installments paid + interest accrued +
/// balance still owed, all at `timeframe` months. Outstanding debt counts
/// as a cost alongside the installments already paid.
#[must_use]
pub fn total_costs(params: &Parameters) -> f64 {
    legs(params).iter().map(|l| l.figures.total_cost()).sum()
}

/// Aggregate figures of a model at its sale horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Value of every asset acquired.
    pub total_value: f64,
    /// Sum of down payments (the initial investment).
    pub down_payments: f64,
    /// Sum of amounts borrowed.
    pub financed: f64,
    /// Sum of monthly installments.
    pub monthly_payment: f64,
    /// Sum of installments paid until the sale.
    pub payments_made: f64,
    /// Interest accrued until the sale.
    pub interest: f64,
    /// Balance owed at the sale.
    pub remaining_debt: f64,
    /// Total cost up to the sale.
    pub total_costs: f64,
}

impl CostBreakdown {
    /// Sums already evaluated legs.
    #[must_use]
    pub fn from_legs(total_value: f64, legs: &[ModelLeg]) -> Self {
        legs.iter().fold(
            CostBreakdown {
                total_value,
                down_payments: 0.0,
                financed: 0.0,
                monthly_payment: 0.0,
                payments_made: 0.0,
                interest: 0.0,
                remaining_debt: 0.0,
                total_costs: 0.0,
            },
            |mut acc, l| {
                acc.down_payments += l.figures.down_payment;
                acc.financed += l.figures.principal;
                acc.monthly_payment += l.figures.installment;
                acc.payments_made += l.figures.payments_made;
                acc.interest += l.figures.interest;
                acc.remaining_debt += l.figures.remaining_balance;
                acc.total_costs += l.figures.total_cost();
                acc
            },
        )
    }

    /// Evaluates and sums the legs of the given parameters.
    #[must_use]
    pub fn from_parameters(params: &Parameters) -> Self {
        Self::from_legs(params.total_value(), &legs(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use keystone_core::types::{FinancingTerms, Model2Parameters, ModelType};

    fn model1() -> Parameters {
        Parameters::default_for(ModelType::BuyAndRenovate)
    }

    fn model2_financed() -> Parameters {
        Parameters::LandAndBuild(Model2Parameters {
            land_value: 75_000.0,
            construction_cost: 75_000.0,
            timeframe: 24,
            profit_margin: 60.0,
            financing: FinancingTerms::new(20.0, 3.0, 30),
        })
    }

    #[test]
    fn test_leg_layout() {
        let kinds: Vec<_> = legs(&model1()).iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LegKind::Property, LegKind::Renovation]);

        let kinds: Vec<_> = legs(&model2_financed()).iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LegKind::LandAndConstruction]);
    }

    #[test]
    fn test_initial_and_financed_are_complementary() {
        for params in [model1(), model2_financed()] {
            assert_relative_eq!(
                initial_investment(&params) + financed_amount(&params),
                params.total_value()
            );
        }
        assert_eq!(financed_amount(&model1()), 96_000.0);
        assert_eq!(initial_investment(&model2_financed()), 30_000.0);
    }

    #[test]
    fn test_model1_total_costs() {
        // property leg 122 867.60 + renovation paid in cash 30 000
        assert_relative_eq!(total_costs(&model1()), 152_867.603_247_304_3, epsilon = 1e-6);
    }

    #[test]
    fn test_model2_total_costs() {
        assert_relative_eq!(
            total_costs(&model2_financed()),
            164_110.544_752_514_98,
            epsilon = 1e-6
        );

        // All cash: costs are exactly the asset value
        let cash = Parameters::default_for(ModelType::LandAndBuild);
        assert_eq!(total_costs(&cash), 150_000.0);
    }

    #[test]
    fn test_breakdown_sums_legs() {
        let params = model1();
        let breakdown = CostBreakdown::from_parameters(&params);
        assert_eq!(breakdown.total_value, 150_000.0);
        assert_eq!(breakdown.down_payments, initial_investment(&params));
        assert_eq!(breakdown.financed, financed_amount(&params));
        assert_relative_eq!(breakdown.total_costs, total_costs(&params));
        assert_relative_eq!(
            breakdown.total_costs,
            breakdown.down_payments
                + breakdown.payments_made
                + breakdown.interest
                + breakdown.remaining_debt,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_remaining_debt_counted_as_cost() {
        // A financed deal costs more than its value once debt is added back.
        let params = model2_financed();
        assert!(total_costs(&params) > params.total_value());
    }
}
