//! Storage error types.

use thiserror::Error;

/// Storage operation result type.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from the underlying storage engine.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Record not found.
    #[error("Record not found: {entity_type} with key '{key}'")]
    NotFound {
        /// The type of entity (e.g., "Simulation").
        entity_type: &'static str,
        /// The key that was not found.
        key: String,
    },

    /// A simulation name is empty or blank.
    #[error("Invalid simulation name: '{0}'")]
    InvalidName(String),

    /// The record cannot be stored faithfully.
    #[error("Invalid simulation record: {0}")]
    InvalidRecord(#[from] keystone_core::KeystoneError),

    /// The result already carries an identity.
    #[error("Simulation '{name}' is already saved with id {id}")]
    AlreadySaved {
        /// Name of the existing simulation.
        name: String,
        /// Id of the existing simulation.
        id: uuid::Uuid,
    },

    /// Transaction error.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Creates a not-found error for a simulation id.
    pub fn simulation_not_found(key: impl ToString) -> Self {
        StorageError::NotFound {
            entity_type: "Simulation",
            key: key.to_string(),
        }
    }
}

impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            StorageError::Deserialization(err.to_string())
        } else {
            StorageError::Serialization(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::simulation_not_found("abc");
        assert_eq!(
            err.to_string(),
            "Record not found: Simulation with key 'abc'"
        );
    }

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let err: StorageError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, StorageError::Deserialization(_)));

        let err: StorageError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, StorageError::Deserialization(_)));
    }
}
