//! Analysis results and saved simulations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parameters::{ModelType, Parameters};
use super::payback::PaybackPeriod;
use crate::error::{KeystoneError, KeystoneResult};

/// Identity given to a result when it is saved as a simulation.
///
/// Assigned by the simulation store; the calculation engine treats it as
/// opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationIdentity {
    /// Unique identifier.
    pub id: Uuid,
    /// User-chosen name.
    pub name: String,
    /// When the simulation was saved.
    pub date: DateTime<Utc>,
}

impl SimulationIdentity {
    /// Creates a fresh identity with a random id, stamped now.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: Utc::now(),
        }
    }
}

/// The outcome of analysing one set of parameters.
///
/// Money fields are raw amounts, percentages are in percent. A result is
/// unsaved until the store attaches a [`SimulationIdentity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Identity, present once saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<SimulationIdentity>,
    /// Which investment model was analysed.
    pub model_type: ModelType,
    /// The parameters the figures were computed from.
    pub parameters: Parameters,
    /// Cash put in upfront (down payments only).
    pub initial_investment: f64,
    /// Total cost to the date of sale.
    pub total_investment: f64,
    /// Sale price.
    pub total_revenue: f64,
    /// Sale price minus total cost.
    pub net_profit: f64,
    /// Return on the initial investment, in percent.
    pub roi: f64,
    /// ROI per month of the timeframe, in percent.
    pub monthly_roi: f64,
    /// Sum of the installments of every loan leg.
    pub monthly_payment: f64,
    /// Sum of the balances still owed at the date of sale.
    pub remaining_debt: f64,
    /// Time to recover the initial investment.
    pub payback: PaybackPeriod,
}

impl AnalysisResult {
    /// Whether the result has been saved as a simulation.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.identity.is_some()
    }

    /// Simulation id, if saved.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.identity.as_ref().map(|i| i.id)
    }

    /// Simulation name, or an empty string while unsaved.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.as_ref().map_or("", |i| i.name.as_str())
    }

    /// Months until sale.
    #[must_use]
    pub fn timeframe(&self) -> u32 {
        self.parameters.timeframe()
    }

    /// Checks that the record is consistent and every number is finite.
    ///
    /// JSON has no representation for NaN or infinities, so a record that
    /// fails this check cannot be read back once persisted.
    pub fn check(&self) -> KeystoneResult<()> {
        let expected = self.parameters.model_type();
        if self.model_type != expected {
            return Err(KeystoneError::ModelMismatch {
                stated: self.model_type.number(),
                parameters: expected.number(),
            });
        }

        let figures = [
            ("initial_investment", self.initial_investment),
            ("total_investment", self.total_investment),
            ("total_revenue", self.total_revenue),
            ("net_profit", self.net_profit),
            ("roi", self.roi),
            ("monthly_roi", self.monthly_roi),
            ("monthly_payment", self.monthly_payment),
            ("remaining_debt", self.remaining_debt),
        ];
        for (field, value) in figures.into_iter().chain(self.parameters.amounts()) {
            if !value.is_finite() {
                return Err(KeystoneError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// Returns this result with the given identity attached.
    #[must_use]
    pub fn with_identity(mut self, identity: SimulationIdentity) -> Self {
        self.identity = Some(identity);
        self
    }
}
