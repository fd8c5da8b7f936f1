//! # Keystone Analytics
//!
//! Investment model aggregation and return analysis.
//!
//! This crate turns model parameters into the figures an investor reads:
//! total cost to the date of sale, the sale price that realises the target
//! margin, ROI on the cash put in, and how long that ROI takes to pay the
//! investment back.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Sentinels over errors**: Division guards return 0 or "not applicable"
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use keystone_analytics::prelude::*;
//! use keystone_core::types::{ModelType, Parameters};
//!
//! let analysis = analyze(&Parameters::default_for(ModelType::BuyAndRenovate));
//! assert_eq!(analysis.initial_investment(), 54_000.0);
//! assert!(analysis.roi > 0.0);
//!
//! let result = analysis.into_result();
//! assert!(!result.is_saved());
//! ```
//!
//! ## Module Overview
//!
//! - [`aggregate`] - Loan legs per model, initial investment, financed amount, total costs
//! - [`returns`] - Sale price, ROI, monthly ROI and payback
//! - [`analysis`] - The full pipeline and recomputation of saved results
//! - [`comparison`] - Multi-transaction projection of saved simulations
//! - [`parallel`] - Batch recompute
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large batches

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod analysis;
pub mod comparison;
pub mod error;
pub mod parallel;
pub mod returns;

pub use error::{AnalyticsError, AnalyticsResult};

pub use aggregate::{
    financed_amount, initial_investment, legs, loan_legs, total_costs, CostBreakdown, LegKind,
    ModelLeg,
};
pub use analysis::{analyze, recompute, Analysis};
pub use comparison::{
    compare, compare_over, transactions_within, MAX_HORIZON_MONTHS, Comparison, RoiProjection, SimulationDetails,
    YearProgress, YearlyEntry,
};
pub use parallel::{maybe_parallel_map, recompute_all, BatchConfig};
pub use returns::{monthly_roi, payback_period, roi, sale_price};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{CostBreakdown, LegKind, ModelLeg};
    pub use crate::analysis::{analyze, recompute, Analysis};
    pub use crate::comparison::{compare, compare_over, Comparison, RoiProjection};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::parallel::{recompute_all, BatchConfig};
    pub use crate::returns::{monthly_roi, payback_period, roi, sale_price};
}
