//! CLI command implementations.

pub mod analyze;
pub mod compare;
pub mod config;
pub mod recompute;
pub mod simulation;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use recompute::RecomputeArgs;
pub use simulation::{DeleteArgs, ListArgs, ShowArgs};

use std::path::PathBuf;

use keystone_core::format::parse_currency;
use keystone_core::types::AnalysisResult;
use keystone_storage::{RedbStorage, SimulationStore};
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Loaded settings.
    pub settings: Settings,
    /// Where the settings live.
    pub settings_path: PathBuf,
    /// `--store` override.
    pub store_override: Option<PathBuf>,
}

impl Context {
    /// The simulation database path in effect.
    pub fn storage_path(&self) -> CliResult<PathBuf> {
        match &self.store_override {
            Some(path) => Ok(path.clone()),
            None => self.settings.resolved_storage_path(),
        }
    }

    /// Opens the simulation database.
    pub fn open_storage(&self) -> anyhow::Result<RedbStorage> {
        let path = self.storage_path()?;
        tracing::debug!("opening storage at {}", path.display());
        Ok(RedbStorage::open(path)?)
    }

    /// Whether human-oriented messages should be printed.
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Parses a money flag, accepting display strings like `120 000,00 €`.
pub fn parse_money(s: &str) -> Result<f64, String> {
    parse_currency(s).map_err(|e| e.to_string())
}

/// Resolves a full simulation id or a unique prefix of one.
pub fn resolve_id(store: &dyn SimulationStore, input: &str) -> anyhow::Result<AnalysisResult> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(store.require(id)?);
    }

    let prefix = input.to_lowercase();
    let mut matches = find_by_prefix(store.list()?, &prefix);
    match matches.len() {
        0 => Err(CliError::UnknownId(input.to_string()).into()),
        1 => Ok(matches.remove(0)),
        n => Err(CliError::AmbiguousId(input.to_string(), n).into()),
    }
}

fn find_by_prefix(results: Vec<AnalysisResult>, prefix: &str) -> Vec<AnalysisResult> {
    if prefix.is_empty() {
        return Vec::new();
    }
    results
        .into_iter()
        .filter(|r| r.id().is_some_and(|id| id.to_string().starts_with(prefix)))
        .collect()
}

/// First eight characters of an id, as shown in listings.
pub fn short_id(result: &AnalysisResult) -> String {
    result
        .id()
        .map(|id| id.to_string()[..8].to_string())
        .unwrap_or_default()
}
