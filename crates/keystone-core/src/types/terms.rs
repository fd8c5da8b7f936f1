//! Financing terms shared by both investment models.

use serde::{Deserialize, Serialize};

use crate::error::{KeystoneError, KeystoneResult};

/// Financing terms of a single loan leg.
///
/// Percentages are expressed in percent (e.g. `20.0` = 20%), the loan term
/// in whole years.
///
/// # Example
///
/// ```
/// use keystone_core::types::FinancingTerms;
///
/// let terms = FinancingTerms::new(20.0, 3.0, 30);
/// assert_eq!(terms.down_payment_of(120_000.0), 24_000.0);
/// assert_eq!(terms.financed_of(120_000.0), 96_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingTerms {
    /// Share of the price paid upfront, in [0, 100].
    pub down_payment_pct: f64,
    /// Nominal annual interest rate, in percent.
    pub annual_rate_pct: f64,
    /// Amortization term of the loan, in years.
    pub term_years: u32,
}

impl FinancingTerms {
    /// Creates financing terms.
    #[must_use]
    pub fn new(down_payment_pct: f64, annual_rate_pct: f64, term_years: u32) -> Self {
        Self {
            down_payment_pct,
            annual_rate_pct,
            term_years,
        }
    }

    /// Terms with everything paid upfront (nothing financed).
    #[must_use]
    pub fn cash(annual_rate_pct: f64, term_years: u32) -> Self {
        Self::new(100.0, annual_rate_pct, term_years)
    }

    /// Down payment as a decimal fraction.
    #[must_use]
    pub fn down_payment_fraction(&self) -> f64 {
        self.down_payment_pct / 100.0
    }

    /// Financed share as a decimal fraction.
    #[must_use]
    pub fn financed_fraction(&self) -> f64 {
        1.0 - self.down_payment_fraction()
    }

    /// Cash paid upfront on an asset of the given value.
    #[must_use]
    pub fn down_payment_of(&self, value: f64) -> f64 {
        value * self.down_payment_fraction()
    }

    /// Amount borrowed on an asset of the given value.
    #[must_use]
    pub fn financed_of(&self, value: f64) -> f64 {
        value * self.financed_fraction()
    }

    /// Returns a copy clamped into the admissible ranges.
    ///
    /// Down payment is clamped to [0, 100], the rate floored at 0 and the
    /// term floored at one year. Non-finite numbers map to the lower bound.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            down_payment_pct: clamp_pct(self.down_payment_pct),
            annual_rate_pct: non_negative(self.annual_rate_pct),
            term_years: self.term_years.max(1),
        }
    }

    /// Checks the terms without modifying them.
    pub fn validate(&self) -> KeystoneResult<()> {
        self.validate_as("down_payment_pct", "annual_rate_pct", "term_years")
    }

    /// Validates using caller-supplied field names, so a renovation leg can
    /// report `renovation_down_payment_pct` instead of the generic name.
    pub(crate) fn validate_as(
        &self,
        down_payment: &'static str,
        rate: &'static str,
        term: &'static str,
    ) -> KeystoneResult<()> {
        if !(0.0..=100.0).contains(&self.down_payment_pct) {
            return Err(KeystoneError::invalid_parameter(
                down_payment,
                self.down_payment_pct,
                "must be between 0 and 100",
            ));
        }
        if !(self.annual_rate_pct >= 0.0 && self.annual_rate_pct.is_finite()) {
            return Err(KeystoneError::invalid_parameter(
                rate,
                self.annual_rate_pct,
                "must be a non-negative percentage",
            ));
        }
        if self.term_years == 0 {
            return Err(KeystoneError::invalid_parameter(
                term,
                0.0,
                "must be at least 1 year",
            ));
        }
        Ok(())
    }
}

/// Floors at zero; NaN and infinities become zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Clamps a percentage into [0, 100]; NaN becomes zero.
pub(crate) fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
