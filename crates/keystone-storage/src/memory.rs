//! In-memory storage adapter.
//!
//! Provides a simple in-memory implementation of both store traits.
//! Useful for testing and development. Data is not persisted across restarts.

use std::collections::HashMap;
use std::sync::RwLock;

use keystone_core::types::{AnalysisResult, ModelType, Parameters};
use uuid::Uuid;

use crate::adapter::{identify, sort_by_date, ParameterStore, SimulationStore};
use crate::error::{StorageError, StorageResult};

/// In-memory storage adapter.
///
/// This adapter stores all data in memory using standard collections.
/// It's thread-safe through the use of RwLock.
///
/// # Example
///
/// ```rust
/// use keystone_storage::{InMemoryStorage, SimulationStore};
///
/// let storage = InMemoryStorage::new();
/// assert!(storage.list().unwrap().is_empty());
/// ```
pub struct InMemoryStorage {
    simulations: RwLock<HashMap<Uuid, AnalysisResult>>,
    parameters: RwLock<HashMap<ModelType, Parameters>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self {
            simulations: RwLock::new(HashMap::new()),
            parameters: RwLock::new(HashMap::new()),
        }
    }

    /// Clears all data from storage.
    pub fn clear(&self) -> StorageResult<()> {
        self.simulations.write().map_err(lock_error)?.clear();
        self.parameters.write().map_err(lock_error)?.clear();
        Ok(())
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Database(format!("Lock error: {}", e))
}

impl SimulationStore for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn save(&self, name: &str, result: AnalysisResult) -> StorageResult<AnalysisResult> {
        let saved = identify(name, result)?;
        let id = saved.id().ok_or_else(|| StorageError::simulation_not_found(name))?;
        self.simulations
            .write()
            .map_err(lock_error)?
            .insert(id, saved.clone());
        log::debug!("saved simulation '{}' ({})", saved.name(), id);
        Ok(saved)
    }

    fn get(&self, id: Uuid) -> StorageResult<Option<AnalysisResult>> {
        Ok(self
            .simulations
            .read()
            .map_err(lock_error)?
            .get(&id)
            .cloned())
    }

    fn list(&self) -> StorageResult<Vec<AnalysisResult>> {
        let mut results: Vec<AnalysisResult> = self
            .simulations
            .read()
            .map_err(lock_error)?
            .values()
            .cloned()
            .collect();
        sort_by_date(&mut results);
        Ok(results)
    }

    fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let deleted = self
            .simulations
            .write()
            .map_err(lock_error)?
            .remove(&id)
            .is_some();
        if deleted {
            log::debug!("deleted simulation {}", id);
        }
        Ok(deleted)
    }

    fn update(&self, result: &AnalysisResult) -> StorageResult<()> {
        let id = result
            .id()
            .ok_or_else(|| StorageError::simulation_not_found("<unsaved>"))?;
        result.check()?;
        let mut simulations = self.simulations.write().map_err(lock_error)?;
        match simulations.get_mut(&id) {
            Some(existing) => {
                *existing = result.clone();
                Ok(())
            }
            None => Err(StorageError::simulation_not_found(id)),
        }
    }
}

impl ParameterStore for InMemoryStorage {
    fn load(&self, model: ModelType) -> StorageResult<Option<Parameters>> {
        Ok(self
            .parameters
            .read()
            .map_err(lock_error)?
            .get(&model)
            .copied())
    }

    fn save_parameters(&self, params: &Parameters) -> StorageResult<()> {
        self.parameters
            .write()
            .map_err(lock_error)?
            .insert(params.model_type(), *params);
        Ok(())
    }

    fn reset(&self, model: ModelType) -> StorageResult<bool> {
        Ok(self
            .parameters
            .write()
            .map_err(lock_error)?
            .remove(&model)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::types::PaybackPeriod;

    fn unsaved(model: ModelType) -> AnalysisResult {
        AnalysisResult {
            identity: None,
            model_type: model,
            parameters: Parameters::default_for(model),
            initial_investment: 1.0,
            total_investment: 1.0,
            total_revenue: 1.0,
            net_profit: 0.0,
            roi: 0.0,
            monthly_roi: 0.0,
            monthly_payment: 0.0,
            remaining_debt: 0.0,
            payback: PaybackPeriod::NotApplicable,
        }
    }

    #[test]
    fn test_save_get_delete() {
        let storage = InMemoryStorage::new();
        let saved = storage
            .save("Flip", unsaved(ModelType::BuyAndRenovate))
            .unwrap();
        let id = saved.id().unwrap();

        assert_eq!(storage.get(id).unwrap(), Some(saved));
        assert!(storage.delete(id).unwrap());
        assert!(!storage.delete(id).unwrap());
        assert_eq!(storage.get(id).unwrap(), None);
    }

    #[test]
    fn test_list_sorted_by_date() {
        let storage = InMemoryStorage::new();
        for name in ["a", "b", "c"] {
            storage.save(name, unsaved(ModelType::LandAndBuild)).unwrap();
        }
        let list = storage.list().unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.windows(2).all(|w| {
            w[0].identity.as_ref().unwrap().date <= w[1].identity.as_ref().unwrap().date
        }));
    }

    #[test]
    fn test_update_requires_existing() {
        let storage = InMemoryStorage::new();
        let mut saved = storage.save("x", unsaved(ModelType::LandAndBuild)).unwrap();
        saved.roi = 12.0;
        storage.update(&saved).unwrap();
        assert_eq!(storage.require(saved.id().unwrap()).unwrap().roi, 12.0);

        storage.delete(saved.id().unwrap()).unwrap();
        assert!(matches!(
            storage.update(&saved),
            Err(StorageError::NotFound { .. })
        ));
        assert!(matches!(
            storage.update(&unsaved(ModelType::LandAndBuild)),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parameters() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.load(ModelType::LandAndBuild).unwrap(), None);

        let mut params = Parameters::default_for(ModelType::LandAndBuild);
        if let Parameters::LandAndBuild(p) = &mut params {
            p.timeframe = 36;
        }
        storage.save_parameters(&params).unwrap();
        assert_eq!(storage.load(ModelType::LandAndBuild).unwrap(), Some(params));
        assert_eq!(storage.load(ModelType::BuyAndRenovate).unwrap(), None);

        assert!(storage.reset(ModelType::LandAndBuild).unwrap());
        assert_eq!(
            storage.load_or_default(ModelType::LandAndBuild).unwrap(),
            Parameters::default_for(ModelType::LandAndBuild)
        );
    }

    #[test]
    fn test_clear() {
        let storage = InMemoryStorage::new();
        storage.save("x", unsaved(ModelType::LandAndBuild)).unwrap();
        storage
            .save_parameters(&Parameters::default_for(ModelType::BuyAndRenovate))
            .unwrap();
        storage.clear().unwrap();
        assert!(storage.list().unwrap().is_empty());
        assert_eq!(storage.load(ModelType::BuyAndRenovate).unwrap(), None);
    }
}
