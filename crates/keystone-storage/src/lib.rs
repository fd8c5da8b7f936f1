//! Keystone Storage Layer
//!
//! This crate persists what the calculator needs across runs: named
//! simulations (analysis results with an identity) and the last-used
//! parameters of each investment model. The calculation engine never
//! touches it; callers inject a store.
//!
//! # Example
//!
//! ```rust,ignore
//! use keystone_storage::{ParameterStore, RedbStorage, SimulationStore};
//!
//! let storage = RedbStorage::open("./keystone.redb")?;
//!
//! // Save a result under a name
//! let saved = storage.save("Lisbon flat", result)?;
//!
//! // Pre-fill the next analysis
//! let params = storage.load_or_default(ModelType::BuyAndRenovate)?;
//! ```
//!
//! # Storage Backends
//!
//! ## RedbStorage (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions. Suitable for single-process applications.
//!
//! ## InMemoryStorage
//!
//! A simple in-memory implementation for testing and development.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod memory;
mod redb;

pub use adapter::{ParameterStore, SimulationStore};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStorage;
pub use redb::RedbStorage;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::{ParameterStore, SimulationStore};
    pub use crate::error::{StorageError, StorageResult};
    pub use crate::memory::InMemoryStorage;
    pub use crate::redb::RedbStorage;
}
