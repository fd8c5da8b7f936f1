//! Payback period representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest payback period reported as an exact number of months.
pub const MAX_PAYBACK_MONTHS: u32 = 600;

/// Time needed for accumulated ROI to reach 100% of the cash invested.
///
/// Its [`Display`](fmt::Display) form is the label shown to users:
///
/// ```
/// use keystone_core::types::PaybackPeriod;
///
/// assert_eq!(PaybackPeriod::Months(1).to_string(), "1 month");
/// assert_eq!(PaybackPeriod::Months(11).to_string(), "11 months");
/// assert_eq!(PaybackPeriod::Months(12).to_string(), "1 year");
/// assert_eq!(PaybackPeriod::Months(25).to_string(), "2 years and 1 month");
/// assert_eq!(PaybackPeriod::Beyond600Months.to_string(), "600+ months");
/// assert_eq!(PaybackPeriod::NotApplicable.to_string(), "not applicable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "camelCase")]
pub enum PaybackPeriod {
    /// The investment never pays back (ROI is zero or negative).
    NotApplicable,
    /// Payback after this many months (1..=600).
    Months(u32),
    /// Payback takes longer than [`MAX_PAYBACK_MONTHS`].
    Beyond600Months,
}

impl PaybackPeriod {
    /// Months to payback, when finite and within the cap.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self {
            PaybackPeriod::Months(m) => Some(*m),
            _ => None,
        }
    }

    /// Whole years and leftover months, when finite and within the cap.
    #[must_use]
    pub fn years_and_months(&self) -> Option<(u32, u32)> {
        self.months().map(|m| (m / 12, m % 12))
    }
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::NotApplicable => f.write_str("not applicable"),
            PaybackPeriod::Beyond600Months => write!(f, "{MAX_PAYBACK_MONTHS}+ months"),
            PaybackPeriod::Months(months) => {
                let (years, rest) = (months / 12, months % 12);
                match (years, rest) {
                    (0, _) => f.write_str(&plural(*months, "month", "months")),
                    (_, 0) => f.write_str(&plural(years, "year", "years")),
                    _ => write!(
                        f,
                        "{} and {}",
                        plural(years, "year", "years"),
                        plural(rest, "month", "months")
                    ),
                }
            }
        }
    }
}
