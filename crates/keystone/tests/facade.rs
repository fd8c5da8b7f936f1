//! Tests of the facade re-exports.

use approx::assert_relative_eq;
use keystone::prelude::*;

#[test]
fn test_legs_add_up_to_total_costs() {
    let params = Parameters::default_for(ModelType::BuyAndRenovate);
    let analysis = analyze(&params);

    let summed: f64 = analysis
        .legs
        .iter()
        .map(|leg| leg.figures.total_cost())
        .sum();
    assert_relative_eq!(summed, analysis.breakdown.total_costs, max_relative = 1e-12);
    assert_eq!(analysis.legs.len(), 2);
}

#[test]
fn test_single_leg_matches_math_crate() {
    let terms = FinancingTerms::new(100.0, 3.0, 30);
    let leg = LoanLeg::new(150_000.0, terms).evaluate(24);
    assert_eq!(leg.principal, 0.0);
    assert_eq!(leg.total_cost(), 150_000.0);

    let result = analyze(&Parameters::default_for(ModelType::LandAndBuild)).into_result();
    assert_eq!(result.total_investment, leg.total_cost());
}

#[cfg(feature = "storage")]
#[test]
fn test_save_and_compare_through_facade() {
    let store = InMemoryStorage::new();
    let result = analyze(&Parameters::default_for(ModelType::BuyAndRenovate)).into_result();
    let saved = store.save("Flip", result).unwrap();

    let cmp = keystone::compare(&[saved]).unwrap();
    assert_eq!(cmp.horizon, 6);
    assert_eq!(cmp.projections[0].transactions, 1);
}
