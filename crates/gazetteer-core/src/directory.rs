use crate::city::{City, CityDraft};
use crate::error::DirectoryError;
use async_trait::async_trait;

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Service contract for the city registry.
///
/// Implementations own the validation and deduplication invariants: a draft
/// is persisted only once every required field is present, and the IBGE id of
/// a newly created city must not already exist in the registry.
#[async_trait]
pub trait CityDirectory: Send + Sync + 'static {
    /// Returns every city, in no particular order.
    async fn list_all(&self) -> Result<Vec<City>>;

    /// Returns the city stored under `id`, or `NotFound`.
    async fn get_by_id(&self, id: &str) -> Result<City>;

    /// Validates and persists a new city, returning the stored record with
    /// its assigned id. Fails with `DuplicateIbgeId` if the IBGE id is taken.
    async fn create(&self, draft: CityDraft) -> Result<City>;

    /// Validates `draft` and overwrites the full record at `id`.
    /// Fails with `NotFound` if `id` does not exist. The IBGE id is not
    /// re-checked for uniqueness against other records.
    async fn update(&self, id: &str, draft: CityDraft) -> Result<City>;

    /// Removes the city stored under `id`, or fails with `NotFound`.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Returns every city flagged as a capital.
    async fn list_capitals(&self) -> Result<Vec<City>>;

    /// Returns every city whose `state` matches exactly.
    async fn list_by_state(&self, state: &str) -> Result<Vec<City>>;

    /// Validates a batch of drafts and persists the ones whose IBGE id is not
    /// already present, skipping duplicates silently. Fails with
    /// `InvalidInput` if the batch is empty or any element is incomplete.
    async fn bulk_create(&self, drafts: Vec<CityDraft>) -> Result<()>;
}
