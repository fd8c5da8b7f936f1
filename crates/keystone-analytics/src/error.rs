//! Error types for analytics operations.

use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur in comparison and batch analytics.
///
/// The single-result pipeline (`analyze`) never fails; these errors come
/// from operations over several saved simulations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A comparison was requested without any simulation.
    #[error("Nothing to compare: at least one simulation is required")]
    NothingToCompare,

    /// The projection horizon is zero or longer than the supported maximum.
    #[error(
        "Invalid comparison horizon: {months} months (expected 1 to {max})",
        max = crate::comparison::MAX_HORIZON_MONTHS
    )]
    InvalidHorizon {
        /// The rejected horizon.
        months: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::InvalidHorizon { months: 0 };
        assert!(err.to_string().contains("0 months"));
    }
}
