//! Property-based tests for analysis invariants.
//!
//! These tests verify properties that should hold for any sanitised input:
//! - Initial investment plus financed amount equals total value
//! - Total costs never fall below the value of the assets
//! - ROI is zero without an upfront investment
//! - The pipeline is deterministic
//! - Comparison projections scale linearly with completed transactions

use approx::assert_relative_eq;
use keystone_analytics::prelude::*;
use keystone_analytics::{financed_amount, initial_investment, total_costs};
use keystone_core::types::{
    FinancingTerms, Model1Parameters, Model2Parameters, Parameters, PaybackPeriod,
    SimulationIdentity,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn terms() -> impl Strategy<Value = FinancingTerms> {
    (0.0f64..=100.0, 0.0f64..12.0, 1u32..=40)
        .prop_map(|(down, rate, years)| FinancingTerms::new(down, rate, years))
}

fn model1() -> impl Strategy<Value = Parameters> {
    (
        1_000.0f64..2_000_000.0,
        0.0f64..500_000.0,
        1u32..=120,
        0.0f64..200.0,
        terms(),
        terms(),
    )
        .prop_map(|(property_value, renovation_cost, timeframe, profit_margin, property, renovation)| {
            Parameters::BuyAndRenovate(Model1Parameters {
                property_value,
                renovation_cost,
                timeframe,
                profit_margin,
                property,
                renovation,
            })
        })
}

fn model2() -> impl Strategy<Value = Parameters> {
    (
        0.0f64..1_000_000.0,
        1_000.0f64..2_000_000.0,
        1u32..=120,
        0.0f64..200.0,
        terms(),
    )
        .prop_map(|(land_value, construction_cost, timeframe, profit_margin, financing)| {
            Parameters::LandAndBuild(Model2Parameters {
                land_value,
                construction_cost,
                timeframe,
                profit_margin,
                financing,
            })
        })
}

fn any_params() -> impl Strategy<Value = Parameters> {
    prop_oneof![model1(), model2()]
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_initial_plus_financed_is_total_value(params in any_params()) {
        let total = initial_investment(&params) + financed_amount(&params);
        assert_relative_eq!(total, params.total_value(), max_relative = 1e-12);
    }

    #[test]
    fn prop_costs_cover_asset_value(params in any_params()) {
        // installments plus balance always repay at least the principal
        prop_assert!(total_costs(&params) >= params.total_value() * (1.0 - 1e-9));
    }

    #[test]
    fn prop_zero_down_payment_has_zero_roi(params in model2()) {
        let Parameters::LandAndBuild(mut p) = params else { unreachable!() };
        p.financing.down_payment_pct = 0.0;
        let analysis = analyze(&Parameters::LandAndBuild(p));
        prop_assert_eq!(analysis.roi, 0.0);
        prop_assert_eq!(analysis.payback, PaybackPeriod::NotApplicable);
    }

    #[test]
    fn prop_pipeline_is_deterministic(params in any_params()) {
        prop_assert_eq!(analyze(&params), analyze(&params));
    }

    #[test]
    fn prop_net_profit_follows_margin(params in any_params()) {
        let analysis = analyze(&params);
        let expected = analysis.total_costs() * params.profit_margin() / 100.0;
        assert_relative_eq!(analysis.net_profit, expected, epsilon = 1e-6, max_relative = 1e-9);
    }

    #[test]
    fn prop_projection_scales_with_transactions(params in any_params(), horizon in 1u32..=240) {
        let result = analyze(&params)
            .into_result()
            .with_identity(SimulationIdentity::new("deal"));
        let cmp = compare_over(std::slice::from_ref(&result), horizon, &BatchConfig::default())
            .unwrap();
        let projection = &cmp.projections[0];

        prop_assert_eq!(projection.transactions, horizon / params.timeframe());
        assert_relative_eq!(
            projection.total_roi,
            result.roi * f64::from(projection.transactions),
            max_relative = 1e-12
        );
        prop_assert_eq!(cmp.yearly.len() as u32, horizon.div_ceil(12));

        // accumulation never decreases year over year
        for pair in cmp.yearly.windows(2) {
            prop_assert!(pair[1].entries[0].transactions >= pair[0].entries[0].transactions);
        }
    }
}
