use crate::city::City;
use crate::error::StorageError;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage contract for city records.
///
/// Backends provide key access plus the secondary-field lookups the service
/// needs. `save` owns key assignment: a record without an id gets one, a
/// record with an id is overwritten in full.
#[async_trait]
pub trait CityRepository: Send + Sync + 'static {
    /// Returns every stored city, in no particular order.
    async fn find_all(&self) -> Result<Vec<City>>;

    /// Retrieves the city stored under `id`.
    /// Returns `None` if no record has that key.
    async fn find_by_id(&self, id: &str) -> Result<Option<City>>;

    /// Returns every city whose `state` matches exactly.
    async fn find_by_state(&self, state: &str) -> Result<Vec<City>>;

    /// Returns every city flagged as a capital.
    async fn find_capitals(&self) -> Result<Vec<City>>;

    /// Retrieves the city with the given IBGE id, if any.
    async fn find_by_ibge_id(&self, ibge_id: i32) -> Result<Option<City>>;

    /// Persists a record, assigning a key when it has none, and returns the
    /// stored record including its id.
    async fn save(&self, city: City) -> Result<City>;

    /// Persists a batch of records in one operation.
    async fn save_all(&self, cities: Vec<City>) -> Result<Vec<City>>;

    /// Removes the record stored under `id`.
    /// Returns `true` if the record existed and was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Checks whether a record exists under `id`.
    async fn exists_by_id(&self, id: &str) -> Result<bool>;
}
