//! A single financed asset evaluated at a sale horizon.

use keystone_core::types::FinancingTerms;
use serde::{Deserialize, Serialize};

use crate::amortization::{accrue, installment_payment};

/// One loan leg: an asset value and the terms it is financed on.
///
/// # Example
///
/// ```
/// use keystone_core::types::FinancingTerms;
/// use keystone_math::LoanLeg;
///
/// let leg = LoanLeg::new(120_000.0, FinancingTerms::new(20.0, 3.0, 30));
/// let figures = leg.evaluate(6);
///
/// assert_eq!(figures.down_payment, 24_000.0);
/// assert_eq!(figures.principal, 96_000.0);
/// assert!(figures.remaining_balance < figures.principal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanLeg {
    /// Value of the asset being acquired.
    pub asset_value: f64,
    /// Financing terms of this leg.
    pub terms: FinancingTerms,
}

impl LoanLeg {
    /// Creates a loan leg.
    #[must_use]
    pub fn new(asset_value: f64, terms: FinancingTerms) -> Self {
        Self { asset_value, terms }
    }

    /// Amount borrowed.
    #[must_use]
    pub fn principal(&self) -> f64 {
        self.terms.financed_of(self.asset_value)
    }

    /// Cash paid upfront.
    #[must_use]
    pub fn down_payment(&self) -> f64 {
        self.terms.down_payment_of(self.asset_value)
    }

    /// Monthly installment over the full loan term.
    #[must_use]
    pub fn installment(&self) -> f64 {
        installment_payment(
            self.principal(),
            self.terms.annual_rate_pct,
            self.terms.term_years,
        )
    }

    /// Evaluates the leg after `months` installments.
    #[must_use]
    pub fn evaluate(&self, months: u32) -> LegFigures {
        let principal = self.principal();
        let installment = self.installment();
        let accrual = accrue(principal, installment, self.terms.annual_rate_pct, months);

        LegFigures {
            principal,
            down_payment: self.down_payment(),
            installment,
            payments_made: installment * f64::from(months),
            interest: accrual.interest,
            remaining_balance: accrual.balance,
        }
    }
}

/// Figures of a loan leg at a given horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegFigures {
    /// Amount borrowed.
    pub principal: f64,
    /// Cash paid upfront.
    pub down_payment: f64,
    /// Monthly installment.
    pub installment: f64,
    /// Sum of installments paid up to the horizon.
    pub payments_made: f64,
    /// Interest accrued up to the horizon.
    pub interest: f64,
    /// Balance still owed at the horizon.
    pub remaining_balance: f64,
}

impl LegFigures {
    /// Cost of the leg up to the horizon.
    ///
    /// Down payment, installments, interest and the outstanding balance are
    /// all added. Installments already contain interest and the balance is
    /// counted as capital tied up in the asset, so this overstates the cash
    /// actually spent; the investment models rely on exactly this figure.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.down_payment + self.payments_made + self.interest + self.remaining_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_property_leg() {
        let leg = LoanLeg::new(120_000.0, FinancingTerms::new(20.0, 3.0, 30));
        let figures = leg.evaluate(6);
        assert_relative_eq!(figures.installment, 404.739_872_380_277_7, epsilon = 1e-6);
        assert_relative_eq!(figures.payments_made, 2_428.439_234_281_666, epsilon = 1e-6);
        assert_relative_eq!(figures.total_cost(), 122_867.603_247_304_3, epsilon = 1e-6);
    }

    #[test]
    fn test_cash_leg_costs_its_value() {
        let leg = LoanLeg::new(30_000.0, FinancingTerms::cash(5.0, 5));
        let figures = leg.evaluate(6);
        assert_eq!(figures.principal, 0.0);
        assert_eq!(figures.installment, 0.0);
        assert_eq!(figures.total_cost(), 30_000.0);
    }

    #[test]
    fn test_interest_free_leg() {
        let leg = LoanLeg::new(24_000.0, FinancingTerms::new(50.0, 0.0, 1));
        let figures = leg.evaluate(6);
        assert_eq!(figures.installment, 1_000.0);
        assert_eq!(figures.interest, 0.0);
        assert_eq!(figures.remaining_balance, 6_000.0);
        assert_eq!(figures.total_cost(), 12_000.0 + 6_000.0 + 6_000.0);
    }
}
