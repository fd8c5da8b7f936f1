//! Investment model parameters.
//!
//! The two investment models share their horizon and profit margin fields
//! but differ in the assets they finance and in the number of loan legs.
//! [`Parameters`] is the tagged union the calculation engine dispatches on.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::terms::{non_negative, FinancingTerms};
use crate::error::{KeystoneError, KeystoneResult};

/// The investment model a set of parameters belongs to.
///
/// Serialized as the integers `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ModelType {
    /// Model 1: buy an existing property and renovate it.
    BuyAndRenovate,
    /// Model 2: buy land and build on it.
    LandAndBuild,
}

impl ModelType {
    /// All model types, in discriminant order.
    pub const ALL: [ModelType; 2] = [ModelType::BuyAndRenovate, ModelType::LandAndBuild];

    /// Numeric discriminant (1 or 2).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            ModelType::BuyAndRenovate => 1,
            ModelType::LandAndBuild => 2,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ModelType::BuyAndRenovate => "Buy and Renovate",
            ModelType::LandAndBuild => "Land and Build",
        }
    }
}

impl TryFrom<u8> for ModelType {
    type Error = KeystoneError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ModelType::BuyAndRenovate),
            2 => Ok(ModelType::LandAndBuild),
            other => Err(KeystoneError::UnknownModelType(other)),
        }
    }
}

impl From<ModelType> for u8 {
    fn from(value: ModelType) -> Self {
        value.number()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of Model 1 (buy and renovate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model1Parameters {
    /// Purchase price of the property.
    pub property_value: f64,
    /// Cost of the renovation works.
    pub renovation_cost: f64,
    /// Months until the property is sold.
    pub timeframe: u32,
    /// Markup over total costs applied to the sale price, in percent.
    pub profit_margin: f64,
    /// Financing of the property purchase.
    pub property: FinancingTerms,
    /// Financing of the renovation.
    pub renovation: FinancingTerms,
}

/// Parameters of Model 2 (land and build).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model2Parameters {
    /// Purchase price of the land.
    pub land_value: f64,
    /// Cost of construction.
    pub construction_cost: f64,
    /// Months until the building is sold.
    pub timeframe: u32,
    /// Markup over total costs applied to the sale price, in percent.
    pub profit_margin: f64,
    /// Financing of land and construction together.
    pub financing: FinancingTerms,
}

impl Model2Parameters {
    /// Land plus construction.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.land_value + self.construction_cost
    }
}

/// Parameters of either investment model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum Parameters {
    /// Buy and renovate.
    BuyAndRenovate(Model1Parameters),
    /// Land and build.
    LandAndBuild(Model2Parameters),
}

impl Parameters {
    /// The initial form values of the given model.
    #[must_use]
    pub fn default_for(model: ModelType) -> Self {
        match model {
            ModelType::BuyAndRenovate => Parameters::BuyAndRenovate(Model1Parameters {
                property_value: 120_000.0,
                renovation_cost: 30_000.0,
                timeframe: 6,
                profit_margin: 30.0,
                property: FinancingTerms::new(20.0, 3.0, 30),
                renovation: FinancingTerms::new(100.0, 5.0, 5),
            }),
            ModelType::LandAndBuild => Parameters::LandAndBuild(Model2Parameters {
                land_value: 75_000.0,
                construction_cost: 75_000.0,
                timeframe: 24,
                profit_margin: 60.0,
                financing: FinancingTerms::new(100.0, 3.0, 30),
            }),
        }
    }

    /// The model these parameters belong to.
    #[must_use]
    pub fn model_type(&self) -> ModelType {
        match self {
            Parameters::BuyAndRenovate(_) => ModelType::BuyAndRenovate,
            Parameters::LandAndBuild(_) => ModelType::LandAndBuild,
        }
    }

    /// Months until sale.
    #[must_use]
    pub fn timeframe(&self) -> u32 {
        match self {
            Parameters::BuyAndRenovate(p) => p.timeframe,
            Parameters::LandAndBuild(p) => p.timeframe,
        }
    }

    /// Profit margin in percent.
    #[must_use]
    pub fn profit_margin(&self) -> f64 {
        match self {
            Parameters::BuyAndRenovate(p) => p.profit_margin,
            Parameters::LandAndBuild(p) => p.profit_margin,
        }
    }

    /// Total value of the assets acquired (before financing).
    #[must_use]
    pub fn total_value(&self) -> f64 {
        match self {
            Parameters::BuyAndRenovate(p) => p.property_value + p.renovation_cost,
            Parameters::LandAndBuild(p) => p.total_value(),
        }
    }

    /// Returns a copy with every field clamped into its admissible range.
    ///
    /// Money values and the profit margin are floored at 0, down payments
    /// clamped to [0, 100], timeframe and terms floored at 1. This is what
    /// an input collector applies before handing parameters to the engine.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        match self {
            Parameters::BuyAndRenovate(p) => Parameters::BuyAndRenovate(Model1Parameters {
                property_value: non_negative(p.property_value),
                renovation_cost: non_negative(p.renovation_cost),
                timeframe: p.timeframe.max(1),
                profit_margin: non_negative(p.profit_margin),
                property: p.property.sanitized(),
                renovation: p.renovation.sanitized(),
            }),
            Parameters::LandAndBuild(p) => Parameters::LandAndBuild(Model2Parameters {
                land_value: non_negative(p.land_value),
                construction_cost: non_negative(p.construction_cost),
                timeframe: p.timeframe.max(1),
                profit_margin: non_negative(p.profit_margin),
                financing: p.financing.sanitized(),
            }),
        }
    }

    /// Every floating-point field, by name.
    #[must_use]
    pub fn amounts(&self) -> Vec<(&'static str, f64)> {
        match self {
            Parameters::BuyAndRenovate(p) => vec![
                ("property_value", p.property_value),
                ("renovation_cost", p.renovation_cost),
                ("profit_margin", p.profit_margin),
                ("property_down_payment_pct", p.property.down_payment_pct),
                ("property_annual_rate_pct", p.property.annual_rate_pct),
                ("renovation_down_payment_pct", p.renovation.down_payment_pct),
                ("renovation_annual_rate_pct", p.renovation.annual_rate_pct),
            ],
            Parameters::LandAndBuild(p) => vec![
                ("land_value", p.land_value),
                ("construction_cost", p.construction_cost),
                ("profit_margin", p.profit_margin),
                ("down_payment_pct", p.financing.down_payment_pct),
                ("annual_rate_pct", p.financing.annual_rate_pct),
            ],
        }
    }

    /// Checks every field, reporting the first one out of range.
    pub fn validate(&self) -> KeystoneResult<()> {
        match self {
            Parameters::BuyAndRenovate(p) => {
                check_money("property_value", p.property_value)?;
                check_money("renovation_cost", p.renovation_cost)?;
                check_common(p.timeframe, p.profit_margin)?;
                p.property.validate()?;
                p.renovation.validate_as(
                    "renovation_down_payment_pct",
                    "renovation_annual_rate_pct",
                    "renovation_term_years",
                )
            }
            Parameters::LandAndBuild(p) => {
                check_money("land_value", p.land_value)?;
                check_money("construction_cost", p.construction_cost)?;
                check_common(p.timeframe, p.profit_margin)?;
                p.financing.validate()
            }
        }
    }
}

impl From<Model1Parameters> for Parameters {
    fn from(value: Model1Parameters) -> Self {
        Parameters::BuyAndRenovate(value)
    }
}

impl From<Model2Parameters> for Parameters {
    fn from(value: Model2Parameters) -> Self {
        Parameters::LandAndBuild(value)
    }
}

fn check_money(field: &'static str, value: f64) -> KeystoneResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(KeystoneError::invalid_parameter(
            field,
            value,
            "must be a non-negative amount",
        ))
    }
}

fn check_common(timeframe: u32, profit_margin: f64) -> KeystoneResult<()> {
    if timeframe == 0 {
        return Err(KeystoneError::invalid_parameter(
            "timeframe",
            0.0,
            "must be at least 1 month",
        ));
    }
    if !(profit_margin >= 0.0 && profit_margin.is_finite()) {
        return Err(KeystoneError::invalid_parameter(
            "profit_margin",
            profit_margin,
            "must be a non-negative percentage",
        ));
    }
    Ok(())
}
