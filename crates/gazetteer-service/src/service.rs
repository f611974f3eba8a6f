use async_trait::async_trait;
use gazetteer_core::city::{City, CityDraft};
use gazetteer_core::directory::{CityDirectory, Result};
use gazetteer_core::error::{DirectoryError, StorageError};
use gazetteer_core::repository::CityRepository;
use std::collections::HashSet;
use std::sync::Arc;

/// A concrete implementation of the `CityDirectory` trait.
///
/// This service wraps a `CityRepository` and owns the registry invariants:
/// - a draft is persisted only when every required field is present
///   (name and state must also be non-empty);
/// - the IBGE id of a newly created city must not already be stored.
///
/// Uniqueness is checked by reading the existing records and comparing in
/// memory, which keeps the logic store-agnostic. The check and the insert
/// are not atomic: two concurrent creates carrying the same IBGE id can
/// both pass the check. Updates do not re-check IBGE-id uniqueness against
/// other records.
#[derive(Debug, Clone)]
pub struct CityService<R> {
    repository: Arc<R>,
}

impl<R: CityRepository> CityService<R> {
    /// Creates a new `CityService` over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validates a draft into an unpersisted record.
    fn validate(draft: CityDraft) -> Result<City> {
        let ibge_id = draft.ibge_id.ok_or_else(|| missing("ibge_id"))?;
        let name = draft
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| missing("name"))?;
        let state = draft
            .state
            .filter(|state| !state.trim().is_empty())
            .ok_or_else(|| missing("state"))?;
        let latitude = draft.latitude.ok_or_else(|| missing("latitude"))?;
        let longitude = draft.longitude.ok_or_else(|| missing("longitude"))?;

        Ok(City {
            id: None,
            ibge_id,
            name,
            state,
            capital: draft.capital,
            latitude,
            longitude,
        })
    }
}

fn missing(field: &str) -> DirectoryError {
    DirectoryError::InvalidInput(format!("missing required field: {}", field))
}

/// Converts a StorageError to a DirectoryError.
fn storage_to_directory_error(e: StorageError) -> DirectoryError {
    DirectoryError::Storage(e.to_string())
}

#[async_trait]
impl<R: CityRepository> CityDirectory for CityService<R> {
    async fn list_all(&self) -> Result<Vec<City>> {
        self.repository
            .find_all()
            .await
            .map_err(storage_to_directory_error)
    }

    async fn get_by_id(&self, id: &str) -> Result<City> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_to_directory_error)?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    async fn create(&self, draft: CityDraft) -> Result<City> {
        let city = Self::validate(draft)?;

        let existing = self
            .repository
            .find_by_ibge_id(city.ibge_id)
            .await
            .map_err(storage_to_directory_error)?;
        if existing.is_some() {
            return Err(DirectoryError::DuplicateIbgeId(city.ibge_id));
        }

        self.repository
            .save(city)
            .await
            .map_err(storage_to_directory_error)
    }

    async fn update(&self, id: &str, draft: CityDraft) -> Result<City> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(storage_to_directory_error)?;
        if !exists {
            return Err(DirectoryError::NotFound(id.to_string()));
        }

        let mut city = Self::validate(draft)?;
        city.id = Some(id.to_string());

        self.repository
            .save(city)
            .await
            .map_err(storage_to_directory_error)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let removed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(storage_to_directory_error)?;
        if !removed {
            return Err(DirectoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_capitals(&self) -> Result<Vec<City>> {
        self.repository
            .find_capitals()
            .await
            .map_err(storage_to_directory_error)
    }

    async fn list_by_state(&self, state: &str) -> Result<Vec<City>> {
        self.repository
            .find_by_state(state)
            .await
            .map_err(storage_to_directory_error)
    }

    async fn bulk_create(&self, drafts: Vec<CityDraft>) -> Result<()> {
        if drafts.is_empty() {
            return Err(DirectoryError::InvalidInput("city list is empty".to_string()));
        }

        let cities = drafts
            .into_iter()
            .map(Self::validate)
            .collect::<Result<Vec<City>>>()?;

        let existing_ibge_ids: HashSet<i32> = self
            .repository
            .find_all()
            .await
            .map_err(storage_to_directory_error)?
            .into_iter()
            .map(|city| city.ibge_id)
            .collect();

        // Rows whose IBGE id is already stored are skipped, not reported.
        let new_cities: Vec<City> = cities
            .into_iter()
            .filter(|city| !existing_ibge_ids.contains(&city.ibge_id))
            .collect();

        if !new_cities.is_empty() {
            self.repository
                .save_all(new_cities)
                .await
                .map_err(storage_to_directory_error)?;
        }

        Ok(())
    }
}
