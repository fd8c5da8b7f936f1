//! Fixed-installment (annuity) loan formulas.
//!
//! All functions take the nominal annual rate in percent and work on
//! monthly periods. They are pure and never fail; the caller guarantees a
//! loan term of at least one year.
//!
//! # Formula
//!
//! ```text
//! r = annual_rate_pct / 12 / 100
//! n = term_years * 12
//! payment = P * r * (1 + r)^n / ((1 + r)^n - 1)      (r > 0)
//! payment = P / n                                    (r = 0)
//! ```
//!
//! Interest and balance are obtained by stepping a running balance month by
//! month. The installment is usually derived from the loan's full term
//! while the evaluation horizon is the (shorter) time until sale, so there
//! is no closed-form shortcut for the rate > 0 case.

use serde::{Deserialize, Serialize};

/// A monthly interest rate as a decimal fraction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MonthlyRate(f64);

impl MonthlyRate {
    /// Converts a nominal annual rate in percent (e.g. `3.0`) to a monthly
    /// decimal rate (`0.0025`).
    #[must_use]
    pub fn from_annual_pct(annual_rate_pct: f64) -> Self {
        Self(annual_rate_pct / 12.0 / 100.0)
    }

    /// The decimal monthly rate.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the loan is interest free.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Interest paid and balance owed after a number of monthly installments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accrual {
    /// Interest accumulated over the period.
    pub interest: f64,
    /// Balance still owed at the end of the period, floored at zero.
    pub balance: f64,
}

/// Monthly installment of a fixed-payment loan.
///
/// # Arguments
///
/// * `principal` - Amount borrowed
/// * `annual_rate_pct` - Nominal annual rate in percent
/// * `term_years` - Loan term in years (at least 1)
///
/// # Example
///
/// ```
/// use keystone_math::amortization::installment_payment;
///
/// let payment = installment_payment(100_000.0, 3.0, 30);
/// assert!((payment - 421.60).abs() < 0.01);
///
/// // Interest free: straight-line repayment
/// assert_eq!(installment_payment(12_000.0, 0.0, 1), 1_000.0);
/// ```
#[must_use]
pub fn installment_payment(principal: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    debug_assert!(term_years >= 1, "loan term must be at least one year");

    let rate = MonthlyRate::from_annual_pct(annual_rate_pct);
    let n = f64::from(term_years) * 12.0;

    if rate.is_zero() {
        return principal / n;
    }

    // (1 + r)^n - 1 without cancellation, so tiny rates tend to P/n
    let r = rate.value();
    let growth_m1 = (n * r.ln_1p()).exp_m1();
    if growth_m1 == 0.0 {
        return principal / n;
    }
    principal * r * (1.0 + growth_m1) / growth_m1
}

/// Interest accumulated over `months` installments.
///
/// Returns zero for an interest-free loan without stepping.
#[must_use]
pub fn interest_accrued(
    principal: f64,
    monthly_payment: f64,
    annual_rate_pct: f64,
    months: u32,
) -> f64 {
    accrue(principal, monthly_payment, annual_rate_pct, months).interest
}

/// Balance still owed after `months` installments, never negative.
///
/// Overpayment is not carried as a credit: once the running balance drops
/// below zero the loan simply shows nothing owed.
#[must_use]
pub fn remaining_balance(
    principal: f64,
    monthly_payment: f64,
    annual_rate_pct: f64,
    months: u32,
) -> f64 {
    accrue(principal, monthly_payment, annual_rate_pct, months).balance
}

/// Interest and remaining balance after `months` installments, in one pass.
///
/// Each month charges `balance * r` as interest and then moves the balance
/// to `balance * (1 + r) - payment`. The running balance is only floored
/// once, at the end. An interest-free loan uses the closed form
/// `max(0, principal - payment * months)`.
#[must_use]
pub fn accrue(principal: f64, monthly_payment: f64, annual_rate_pct: f64, months: u32) -> Accrual {
    let rate = MonthlyRate::from_annual_pct(annual_rate_pct);

    if rate.is_zero() {
        return Accrual {
            interest: 0.0,
            balance: (principal - monthly_payment * f64::from(months)).max(0.0),
        };
    }

    let r = rate.value();
    let mut balance = principal;
    let mut interest = 0.0;
    for _ in 0..months {
        interest += balance * r;
        balance = balance * (1.0 + r) - monthly_payment;
    }

    log::trace!(
        "accrued {months} months on {principal:.2}: interest {interest:.2}, balance {balance:.2}"
    );

    Accrual {
        interest,
        balance: balance.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_monthly_rate() {
        assert_relative_eq!(MonthlyRate::from_annual_pct(3.0).value(), 0.0025);
        assert!(MonthlyRate::from_annual_pct(0.0).is_zero());
    }

    #[test]
    fn test_standard_annuity() {
        // 100k at 3% over 30 years
        assert_relative_eq!(
            installment_payment(100_000.0, 3.0, 30),
            421.604_033_729_456,
            epsilon = 1e-6
        );
        // 96k at 3% over 30 years (default buy-and-renovate property leg)
        assert_relative_eq!(
            installment_payment(96_000.0, 3.0, 30),
            404.739_872_380_277_7,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_tiny_rate_is_straight_line() {
        // 1 + r rounds to 1.0 at this rate
        let payment = installment_payment(96_000.0, 1e-13, 30);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 96_000.0 / 360.0, max_relative = 1e-9);

        let accrual = accrue(96_000.0, payment, 1e-13, 6);
        assert!(accrual.interest.is_finite());
        assert_relative_eq!(accrual.balance, 96_000.0 - payment * 6.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(installment_payment(0.0, 5.0, 5), 0.0);
        assert_eq!(accrue(0.0, 0.0, 5.0, 6), Accrual { interest: 0.0, balance: 0.0 });
    }

    #[test]
    fn test_zero_rate_short_circuits() {
        assert_eq!(interest_accrued(10_000.0, 100.0, 0.0, 12), 0.0);
        assert_eq!(remaining_balance(10_000.0, 100.0, 0.0, 12), 8_800.0);
        // Overpaid interest-free loan shows no debt
        assert_eq!(remaining_balance(1_000.0, 100.0, 0.0, 12), 0.0);
    }

    #[test]
    fn test_default_property_leg_at_six_months() {
        let payment = installment_payment(96_000.0, 3.0, 30);
        let accrual = accrue(96_000.0, payment, 3.0, 6);
        assert_relative_eq!(accrual.interest, 1_433.801_623_652_157_6, epsilon = 1e-6);
        assert_relative_eq!(accrual.balance, 95_005.362_389_370_48, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_months() {
        let accrual = accrue(50_000.0, 300.0, 4.0, 0);
        assert_eq!(accrual.interest, 0.0);
        assert_eq!(accrual.balance, 50_000.0);
    }

    #[test]
    fn test_overpayment_floors_balance() {
        // Paying 10k a month on a 20k loan clears it in the third month.
        let balance = remaining_balance(20_000.0, 10_000.0, 6.0, 3);
        assert_eq!(balance, 0.0);
    }

    proptest! {
        #[test]
        fn prop_interest_free_fully_amortizes(principal in 1.0f64..5e6, years in 1u32..40) {
            let months = years * 12;
            let payment = installment_payment(principal, 0.0, years);
            prop_assert!((payment - principal / f64::from(months)).abs() <= 1e-9 * principal);
            prop_assert!(remaining_balance(principal, payment, 0.0, months) <= 1e-6 * principal);
        }

        #[test]
        fn prop_full_term_amortizes(
            principal in 1_000.0f64..5e6,
            rate in 0.1f64..15.0,
            years in 1u32..40,
        ) {
            let months = years * 12;
            let payment = installment_payment(principal, rate, years);
            let balance = remaining_balance(principal, payment, rate, months);
            prop_assert!(balance <= 1e-6 * principal, "balance {} left on {}", balance, principal);
        }

        #[test]
        fn prop_interest_non_decreasing(
            principal in 1_000.0f64..1e6,
            rate in 0.1f64..15.0,
            years in 1u32..40,
            months in 0u32..480,
        ) {
            let payment = installment_payment(principal, rate, years);
            let months = months.min(years * 12 - 1);
            let before = interest_accrued(principal, payment, rate, months);
            let after = interest_accrued(principal, payment, rate, months + 1);
            prop_assert!(after >= before);
        }

        #[test]
        fn prop_single_pass_matches_separate_calls(
            principal in 0.0f64..1e6,
            payment in 0.0f64..10_000.0,
            rate in 0.0f64..15.0,
            months in 0u32..360,
        ) {
            let accrual = accrue(principal, payment, rate, months);
            prop_assert_eq!(accrual.interest, interest_accrued(principal, payment, rate, months));
            prop_assert_eq!(accrual.balance, remaining_balance(principal, payment, rate, months));
            prop_assert!(accrual.balance >= 0.0);
        }
    }
}
