use thiserror::Error;

/// Errors surfaced by a storage backend.
///
/// The store does not enforce IBGE-id uniqueness; deduplication is a service
/// concern, so there is no conflict variant here.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the city directory service.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("city data is incomplete: {0}")]
    InvalidInput(String),
    #[error("city with id '{0}' does not exist")]
    NotFound(String),
    #[error("city with IBGE id {0} already exists")]
    DuplicateIbgeId(i32),
    #[error("storage error: {0}")]
    Storage(String),
}
