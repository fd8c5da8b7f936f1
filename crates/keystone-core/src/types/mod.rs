//! Domain types: financing terms, model parameters and analysis results.

mod parameters;
mod payback;
mod result;
mod terms;

pub use parameters::{Model1Parameters, Model2Parameters, ModelType, Parameters};
pub use payback::{PaybackPeriod, MAX_PAYBACK_MONTHS};
pub use result::{AnalysisResult, SimulationIdentity};
pub use terms::FinancingTerms;
