//! # Keystone Core
//!
//! Core types for the Keystone real-estate investment calculator.
//!
//! This crate provides:
//!
//! - **Types**: Financing terms, per-model parameters, analysis results and
//!   payback periods
//! - **Sanitisation**: The clamping rules every input collector applies
//!   before handing parameters to the engine
//! - **Formatting**: The single money/percent display format
//!
//! The calculation engine lives in `keystone-math` and `keystone-analytics`;
//! nothing here performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod format;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{KeystoneError, KeystoneResult};
    pub use crate::format::{format_currency, format_number, format_percent, parse_currency};
    pub use crate::types::{
        AnalysisResult, FinancingTerms, Model1Parameters, Model2Parameters, ModelType,
        Parameters, PaybackPeriod, SimulationIdentity,
    };
}

pub use error::{KeystoneError, KeystoneResult};
