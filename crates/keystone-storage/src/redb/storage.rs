//! RedbStorage implementation.
//!
//! Implements both store traits using redb as the underlying database.
//! Values are the JSON form of the stored records.

use std::path::Path;
use std::sync::Arc;

use keystone_core::types::{AnalysisResult, ModelType, Parameters};
use redb::{Database, ReadableTable, TableDefinition};
use uuid::Uuid;

use crate::adapter::{identify, sort_by_date, ParameterStore, SimulationStore};
use crate::error::{StorageError, StorageResult};

// Table definitions
const SIMULATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("simulations");
const PARAMETERS_TABLE: TableDefinition<u8, &[u8]> = TableDefinition::new("parameters");

/// Redb-based storage adapter.
///
/// This adapter uses redb, a pure-Rust embedded database, for persistent storage.
/// It provides ACID transactions and is suitable for single-process applications.
///
/// # Example
///
/// ```rust,ignore
/// use keystone_storage::{RedbStorage, SimulationStore};
///
/// let storage = RedbStorage::open("./keystone.redb")?;
/// for simulation in storage.list()? {
///     println!("{}", simulation.name());
/// }
/// ```
pub struct RedbStorage {
    db: Arc<Database>,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.initialize_tables()?;
        log::debug!("opened redb storage at {}", path.display());
        Ok(storage)
    }


    /// Initializes all required tables.
    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            // Create tables if they don't exist
            let _ = write_txn.open_table(SIMULATIONS_TABLE)?;
            let _ = write_txn.open_table(PARAMETERS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Checks if the database is accessible.
    pub fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }
}

impl SimulationStore for RedbStorage {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn save(&self, name: &str, result: AnalysisResult) -> StorageResult<AnalysisResult> {
        let saved = identify(name, result)?;
        let key = saved
            .id()
            .ok_or_else(|| StorageError::simulation_not_found(name))?
            .to_string();
        let data = serde_json::to_vec(&saved)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SIMULATIONS_TABLE)?;
            table.insert(key.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;

        log::debug!("saved simulation '{}' ({})", saved.name(), key);
        Ok(saved)
    }

    fn get(&self, id: Uuid) -> StorageResult<Option<AnalysisResult>> {
        let key = id.to_string();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SIMULATIONS_TABLE)?;
        match table.get(key.as_str())? {
            Some(data) => {
                let result: AnalysisResult = serde_json::from_slice(data.value())?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    fn list(&self) -> StorageResult<Vec<AnalysisResult>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SIMULATIONS_TABLE)?;

        let mut results = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let result: AnalysisResult = serde_json::from_slice(value.value())?;
            results.push(result);
        }

        sort_by_date(&mut results);
        Ok(results)
    }

    fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let key = id.to_string();
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(SIMULATIONS_TABLE)?;
            let result = table.remove(key.as_str())?;
            result.is_some()
        };
        write_txn.commit()?;

        if deleted {
            log::debug!("deleted simulation {}", key);
        }
        Ok(deleted)
    }

    fn update(&self, result: &AnalysisResult) -> StorageResult<()> {
        let key = result
            .id()
            .ok_or_else(|| StorageError::simulation_not_found("<unsaved>"))?
            .to_string();
        result.check()?;
        let data = serde_json::to_vec(result)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SIMULATIONS_TABLE)?;
            let exists = table.get(key.as_str())?.is_some();
            if !exists {
                return Err(StorageError::simulation_not_found(key));
            }
            table.insert(key.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl ParameterStore for RedbStorage {
    fn load(&self, model: ModelType) -> StorageResult<Option<Parameters>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PARAMETERS_TABLE)?;
        match table.get(model.number())? {
            Some(data) => {
                let params: Parameters = serde_json::from_slice(data.value())?;
                Ok(Some(params))
            }
            None => Ok(None),
        }
    }

    fn save_parameters(&self, params: &Parameters) -> StorageResult<()> {
        let data = serde_json::to_vec(params)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PARAMETERS_TABLE)?;
            table.insert(params.model_type().number(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn reset(&self, model: ModelType) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(PARAMETERS_TABLE)?;
            let result = table.remove(model.number())?;
            result.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::types::PaybackPeriod;
    use keystone_core::KeystoneError;
    use tempfile::{tempdir, TempDir};

    fn temp_storage() -> (TempDir, RedbStorage) {
        let dir = tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("keystone.redb")).unwrap();
        (dir, storage)
    }

    fn unsaved(model: ModelType) -> AnalysisResult {
        AnalysisResult {
            identity: None,
            model_type: model,
            parameters: Parameters::default_for(model),
            initial_investment: 54_000.0,
            total_investment: 152_867.603_247_304_3,
            total_revenue: 198_727.884_221_495_6,
            net_profit: 45_860.280_974_191_29,
            roi: 84.926_446_248_502_4,
            monthly_roi: 14.154_407_708_083_733,
            monthly_payment: 404.739_872_380_277_7,
            remaining_debt: 95_005.362_389_370_48,
            payback: PaybackPeriod::Months(8),
        }
    }

    #[test]
    fn test_fresh_storage_is_healthy() {
        let (_dir, storage) = temp_storage();
        assert!(storage.is_healthy());
        assert_eq!(storage.backend_name(), "redb");
    }

    #[test]
    fn test_simulation_roundtrip() {
        let (_dir, storage) = temp_storage();
        let saved = storage
            .save("Flip", unsaved(ModelType::BuyAndRenovate))
            .unwrap();
        let id = saved.id().unwrap();

        assert_eq!(storage.get(id).unwrap(), Some(saved.clone()));
        assert_eq!(storage.list().unwrap(), vec![saved]);
        assert!(storage.delete(id).unwrap());
        assert!(storage.list().unwrap().is_empty());
        assert!(!storage.delete(id).unwrap());
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("keystone.redb");

        let saved = {
            let storage = RedbStorage::open(&path).unwrap();
            storage
                .save_parameters(&Parameters::default_for(ModelType::LandAndBuild))
                .unwrap();
            storage
                .save("Plot", unsaved(ModelType::LandAndBuild))
                .unwrap()
        };

        let storage = RedbStorage::open(&path).unwrap();
        assert_eq!(storage.require(saved.id().unwrap()).unwrap(), saved);
        assert_eq!(
            storage.load(ModelType::LandAndBuild).unwrap(),
            Some(Parameters::default_for(ModelType::LandAndBuild))
        );
    }

    #[test]
    fn test_update() {
        let (_dir, storage) = temp_storage();
        let mut saved = storage
            .save("Flip", unsaved(ModelType::BuyAndRenovate))
            .unwrap();
        saved.total_revenue = 1.0;
        storage.update(&saved).unwrap();
        assert_eq!(storage.get(saved.id().unwrap()).unwrap(), Some(saved.clone()));

        storage.delete(saved.id().unwrap()).unwrap();
        assert!(matches!(
            storage.update(&saved),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parameters_reset() {
        let (_dir, storage) = temp_storage();
        assert!(!storage.reset(ModelType::BuyAndRenovate).unwrap());

        let params = Parameters::default_for(ModelType::BuyAndRenovate);
        storage.save_parameters(&params).unwrap();
        assert_eq!(storage.load(ModelType::BuyAndRenovate).unwrap(), Some(params));
        assert!(storage.reset(ModelType::BuyAndRenovate).unwrap());
        assert_eq!(storage.load(ModelType::BuyAndRenovate).unwrap(), None);
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let (_dir, storage) = temp_storage();
        assert!(matches!(
            storage.save(" ", unsaved(ModelType::LandAndBuild)),
            Err(StorageError::InvalidName(_))
        ));
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_result_is_not_written() {
        let (_dir, storage) = temp_storage();
        let good = storage
            .save("Flip", unsaved(ModelType::BuyAndRenovate))
            .unwrap();

        let mut broken = unsaved(ModelType::BuyAndRenovate);
        broken.total_investment = f64::NAN;
        broken.roi = f64::NAN;
        assert!(matches!(
            storage.save("tiny", broken),
            Err(StorageError::InvalidRecord(KeystoneError::NonFinite { .. }))
        ));

        let mut stale = good.clone();
        stale.net_profit = f64::INFINITY;
        assert!(matches!(
            storage.update(&stale),
            Err(StorageError::InvalidRecord(_))
        ));

        // the store stays readable
        assert_eq!(storage.list().unwrap(), vec![good]);
    }
}
