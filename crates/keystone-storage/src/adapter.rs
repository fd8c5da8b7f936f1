//! Storage adapter traits.
//!
//! Two stores back the calculator: saved simulations, and the last-used
//! parameters of each model that pre-fill the next analysis. Every backend
//! implements both.

use keystone_core::types::{AnalysisResult, ModelType, Parameters, SimulationIdentity};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// Persistence of saved simulations.
///
/// # Example
///
/// ```rust
/// use keystone_analytics::analyze;
/// use keystone_core::types::{ModelType, Parameters};
/// use keystone_storage::{InMemoryStorage, SimulationStore};
///
/// let storage = InMemoryStorage::new();
/// let result = analyze(&Parameters::default_for(ModelType::LandAndBuild)).into_result();
///
/// let saved = storage.save("Plot 7", result).unwrap();
/// let id = saved.id().unwrap();
/// assert_eq!(storage.get(id).unwrap(), Some(saved));
/// ```
pub trait SimulationStore: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Saves an unsaved result under `name`.
    ///
    /// Assigns a fresh id and the current UTC time, and returns the saved
    /// record. Blank names are rejected, as are results that already carry
    /// an identity or that fail [`AnalysisResult::check`].
    fn save(&self, name: &str, result: AnalysisResult) -> StorageResult<AnalysisResult>;

    /// Retrieves a simulation by id.
    fn get(&self, id: Uuid) -> StorageResult<Option<AnalysisResult>>;

    /// Lists every simulation, oldest first.
    fn list(&self) -> StorageResult<Vec<AnalysisResult>>;

    /// Deletes a simulation, returning whether it existed.
    fn delete(&self, id: Uuid) -> StorageResult<bool>;

    /// Replaces the figures of an existing simulation, keeping its identity.
    ///
    /// Records with non-finite figures are rejected like in [`save`](Self::save).
    fn update(&self, result: &AnalysisResult) -> StorageResult<()>;

    /// Retrieves a simulation that must exist.
    fn require(&self, id: Uuid) -> StorageResult<AnalysisResult> {
        self.get(id)?
            .ok_or_else(|| StorageError::simulation_not_found(id))
    }
}

/// Persistence of the last-used parameters of each model.
pub trait ParameterStore: Send + Sync {
    /// The parameters last saved for `model`, if any.
    fn load(&self, model: ModelType) -> StorageResult<Option<Parameters>>;

    /// Saves parameters under their own model type, replacing older ones.
    fn save_parameters(&self, params: &Parameters) -> StorageResult<()>;

    /// Forgets the parameters of `model`, returning whether any were stored.
    fn reset(&self, model: ModelType) -> StorageResult<bool>;

    /// The stored parameters of `model`, or its defaults.
    fn load_or_default(&self, model: ModelType) -> StorageResult<Parameters> {
        Ok(self
            .load(model)?
            .unwrap_or_else(|| Parameters::default_for(model)))
    }
}

/// Validates a save request and attaches a fresh identity.
pub(crate) fn identify(name: &str, result: AnalysisResult) -> StorageResult<AnalysisResult> {
    if let Some(identity) = &result.identity {
        return Err(StorageError::AlreadySaved {
            name: identity.name.clone(),
            id: identity.id,
        });
    }

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    result.check()?;

    Ok(result.with_identity(SimulationIdentity::new(trimmed)))
}

/// Orders simulations oldest first, ties broken by id.
pub(crate) fn sort_by_date(results: &mut [AnalysisResult]) {
    results.sort_by_key(|r| (r.identity.as_ref().map(|i| i.date), r.id()));
}
