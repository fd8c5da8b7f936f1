//! Sale price, return on investment and payback period.
//!
//! The division guards return sentinels instead of errors: an all-financed
//! deal has a 0% ROI, a zero-month horizon a 0% monthly ROI, and a
//! non-positive ROI never pays back.

use keystone_core::types::{PaybackPeriod, MAX_PAYBACK_MONTHS};

/// Sale price that realises `profit_margin_pct` over total costs.
///
/// ```
/// use keystone_analytics::returns::sale_price;
///
/// assert_eq!(sale_price(100_000.0, 30.0), 130_000.0);
/// ```
#[must_use]
pub fn sale_price(total_costs: f64, profit_margin_pct: f64) -> f64 {
    total_costs * (1.0 + profit_margin_pct / 100.0)
}

/// Net profit relative to the cash invested upfront, in percent.
///
/// Returns 0 when nothing was invested upfront.
#[must_use]
pub fn roi(sale_price: f64, total_costs: f64, initial_investment: f64) -> f64 {
    if initial_investment == 0.0 {
        return 0.0;
    }
    (sale_price - total_costs) / initial_investment * 100.0
}

/// ROI per month of the holding period. Returns 0 for a zero-month period.
#[must_use]
pub fn monthly_roi(roi: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    roi / f64::from(months)
}

/// Months until the accumulated ROI reaches 100%.
///
/// With `roi` earned every `timeframe_months`, the monthly ROI is
/// `roi / timeframe_months` and payback takes `ceil(100 / monthly_roi)`
/// months. Anything beyond [`MAX_PAYBACK_MONTHS`] is reported as open
/// ended.
///
/// A zero timeframe has a guarded monthly ROI of 0 and is reported as
/// [`PaybackPeriod::Beyond600Months`].
///
/// ```
/// use keystone_analytics::returns::payback_period;
///
/// assert_eq!(payback_period(20.0, 24).to_string(), "10 years");
/// assert_eq!(payback_period(-5.0, 24).to_string(), "not applicable");
/// ```
#[must_use]
pub fn payback_period(roi: f64, timeframe_months: u32) -> PaybackPeriod {
    if roi <= 0.0 || roi.is_nan() {
        return PaybackPeriod::NotApplicable;
    }

    let per_month = monthly_roi(roi, timeframe_months);
    let months = (100.0 / per_month).ceil();

    if months.is_nan() || months < 0.0 {
        return PaybackPeriod::NotApplicable;
    }
    if months > f64::from(MAX_PAYBACK_MONTHS) {
        return PaybackPeriod::Beyond600Months;
    }

    #[allow(clippy::cast_possible_truncation)]
    let months = months as u32;
    PaybackPeriod::Months(months)
}
