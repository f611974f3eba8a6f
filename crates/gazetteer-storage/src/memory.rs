use async_trait::async_trait;
use dashmap::DashMap;
use gazetteer_core::city::City;
use gazetteer_core::repository::{CityRepository, Result};
use uuid::Uuid;

/// In-memory implementation of the repository contract using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Secondary-field lookups scan the whole map,
/// which is acceptable at the scale this backend serves (tests and local
/// runs).
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: DashMap<String, City>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CityRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<City>> {
        Ok(self.storage.iter().map(|e| e.value().clone()).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<City>> {
        Ok(self.storage.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_state(&self, state: &str) -> Result<Vec<City>> {
        Ok(self
            .storage
            .iter()
            .filter(|e| e.value().state == state)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn find_capitals(&self) -> Result<Vec<City>> {
        Ok(self
            .storage
            .iter()
            .filter(|e| e.value().capital)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn find_by_ibge_id(&self, ibge_id: i32) -> Result<Option<City>> {
        Ok(self
            .storage
            .iter()
            .find(|e| e.value().ibge_id == ibge_id)
            .map(|e| e.value().clone()))
    }

    async fn save(&self, mut city: City) -> Result<City> {
        let key = match city.id.clone() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                city.id = Some(id.clone());
                id
            }
        };

        self.storage.insert(key, city.clone());
        Ok(city)
    }

    async fn save_all(&self, cities: Vec<City>) -> Result<Vec<City>> {
        let mut stored = Vec::with_capacity(cities.len());
        for city in cities {
            stored.push(self.save(city).await?);
        }
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.storage.remove(id).is_some())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.storage.contains_key(id))
    }
}
