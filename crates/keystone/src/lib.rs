//! # Keystone
//!
//! Real-estate investment calculator: what a leveraged deal costs until
//! the sale, what it has to sell for, and what it returns on the cash put
//! in.
//!
//! This crate re-exports the workspace crates under one name:
//!
//! - [`core`] - Parameters, financing terms, results and display formatting
//! - [`math`] - French amortization of a single loan leg
//! - [`analytics`] - Model aggregation, returns, comparison of simulations
//! - [`storage`] - Saved simulations and last-used parameters (feature `storage`)
//!
//! ## Quick Start
//!
//! ```rust
//! use keystone::prelude::*;
//!
//! let result = analyze(&Parameters::default_for(ModelType::LandAndBuild)).into_result();
//! assert_eq!(format_currency(result.net_profit), "90 000,00 €");
//! assert_eq!(format_percent(result.roi), "60.00%");
//! ```
//!
//! With the `storage` feature (on by default) results can be saved and
//! compared:
//!
//! ```rust
//! # #[cfg(feature = "storage")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use keystone::prelude::*;
//!
//! let store = InMemoryStorage::new();
//! for model in ModelType::ALL {
//!     let result = analyze(&Parameters::default_for(model)).into_result();
//!     store.save(model.label(), result)?;
//! }
//!
//! let cmp = compare(&store.list()?)?;
//! assert_eq!(cmp.horizon, 24);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "storage"))]
//! # fn main() {}
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use keystone_analytics as analytics;
pub use keystone_core as core;
pub use keystone_math as math;
#[cfg(feature = "storage")]
pub use keystone_storage as storage;

pub use keystone_analytics::{analyze, compare, recompute, Analysis, Comparison};
pub use keystone_core::types::{
    AnalysisResult, FinancingTerms, Model1Parameters, Model2Parameters, ModelType, Parameters,
    PaybackPeriod,
};
pub use keystone_core::{KeystoneError, KeystoneResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use keystone_analytics::prelude::*;
    pub use keystone_core::prelude::*;
    pub use keystone_math::prelude::*;
    #[cfg(feature = "storage")]
    pub use keystone_storage::prelude::*;
}
