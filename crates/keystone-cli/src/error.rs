//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Simulation id that matches nothing.
    #[error("No simulation matches id '{0}'")]
    UnknownId(String),

    /// Id prefix that matches several simulations.
    #[error("Id '{0}' is ambiguous: matches {1} simulations")]
    AmbiguousId(String, usize),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Unknown settings key.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid settings value.
    #[error("Invalid value for {key}: {value}. {hint}")]
    InvalidValue {
        /// Settings key.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted values.
        hint: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
