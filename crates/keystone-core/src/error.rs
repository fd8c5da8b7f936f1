//! Error types for the Keystone core types.
//!
//! The calculation engine itself never fails: its guards return sentinel
//! values. Errors here belong to the edges of the core, where parameters are
//! checked or display strings are parsed back into numbers.

use thiserror::Error;

/// A specialized Result type for Keystone core operations.
pub type KeystoneResult<T> = Result<T, KeystoneError>;

/// Errors raised by parameter validation and currency parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeystoneError {
    /// A parameter is outside its admissible range.
    #[error("Invalid parameter `{field}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A currency string could not be interpreted as a number.
    #[error("Cannot parse currency value: '{input}'")]
    CurrencyParse {
        /// The raw input.
        input: String,
    },

    /// Unknown investment model discriminant.
    #[error("Unknown model type: {0} (expected 1 or 2)")]
    UnknownModelType(u8),

    /// A figure is NaN or infinite.
    #[error("Non-finite value in `{field}`: {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A result's model type disagrees with its parameters.
    #[error("Model type {stated} does not match parameters of model {parameters}")]
    ModelMismatch {
        /// The model type recorded on the result.
        stated: u8,
        /// The model the parameters belong to.
        parameters: u8,
    },
}

impl KeystoneError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            field,
            value,
            reason,
        }
    }
}
