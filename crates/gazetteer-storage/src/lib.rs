//! Storage backends for the gazetteer city registry.
//!
//! Two implementations of the `CityRepository` contract: an in-memory map
//! for tests and local runs, and a MySQL backend for persistent deployments.

pub mod memory;
pub mod mysql;

pub use gazetteer_core::repository::{CityRepository, Result};
pub use gazetteer_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
