use async_trait::async_trait;
use gazetteer_core::city::City;
use gazetteer_core::error::StorageError;
use gazetteer_core::repository::{CityRepository, Result};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

/// MySQL implementation of the repository contract.
///
/// `save` follows document-store semantics: a record without an id is
/// inserted under a fresh key, a record with an id overwrites the full row.
/// The schema carries no unique index on `ibge_id`; IBGE-id uniqueness is
/// enforced by the service layer.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn city_from_row(row: &MySqlRow) -> Result<City> {
    Ok(City {
        id: Some(row.try_get("id").map_err(map_sqlx_error)?),
        ibge_id: row.try_get("ibge_id").map_err(map_sqlx_error)?,
        name: row.try_get("name").map_err(map_sqlx_error)?,
        state: row.try_get("state").map_err(map_sqlx_error)?,
        capital: row.try_get("capital").map_err(map_sqlx_error)?,
        latitude: row.try_get("latitude").map_err(map_sqlx_error)?,
        longitude: row.try_get("longitude").map_err(map_sqlx_error)?,
    })
}

fn assign_id(city: &mut City) -> String {
    match city.id.clone() {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            city.id = Some(id.clone());
            id
        }
    }
}

async fn upsert_city<'e, E>(
    executor: E,
    city: &City,
    id: &str,
) -> std::result::Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::MySql>,
{
    sqlx::query(
        r#"
        INSERT INTO cities (id, ibge_id, name, state, capital, latitude, longitude)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            ibge_id = VALUES(ibge_id),
            name = VALUES(name),
            state = VALUES(state),
            capital = VALUES(capital),
            latitude = VALUES(latitude),
            longitude = VALUES(longitude)
        "#,
    )
    .bind(id)
    .bind(city.ibge_id)
    .bind(&city.name)
    .bind(&city.state)
    .bind(city.capital)
    .bind(city.latitude)
    .bind(city.longitude)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl CityRepository for MySqlRepository {
    async fn find_all(&self) -> Result<Vec<City>> {
        let rows = sqlx::query(
            r#"
            SELECT id, ibge_id, name, state, capital, latitude, longitude
            FROM cities
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(city_from_row).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<City>> {
        let row = sqlx::query(
            r#"
            SELECT id, ibge_id, name, state, capital, latitude, longitude
            FROM cities
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(city_from_row).transpose()
    }

    async fn find_by_state(&self, state: &str) -> Result<Vec<City>> {
        let rows = sqlx::query(
            r#"
            SELECT id, ibge_id, name, state, capital, latitude, longitude
            FROM cities
            WHERE state = ?
            "#,
        )
        .bind(state)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(city_from_row).collect()
    }

    async fn find_capitals(&self) -> Result<Vec<City>> {
        let rows = sqlx::query(
            r#"
            SELECT id, ibge_id, name, state, capital, latitude, longitude
            FROM cities
            WHERE capital = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(city_from_row).collect()
    }

    async fn find_by_ibge_id(&self, ibge_id: i32) -> Result<Option<City>> {
        let row = sqlx::query(
            r#"
            SELECT id, ibge_id, name, state, capital, latitude, longitude
            FROM cities
            WHERE ibge_id = ?
            LIMIT 1
            "#,
        )
        .bind(ibge_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(city_from_row).transpose()
    }

    async fn save(&self, mut city: City) -> Result<City> {
        let id = assign_id(&mut city);

        upsert_city(&self.pool, &city, &id)
            .await
            .map_err(map_sqlx_error)?;

        Ok(city)
    }

    async fn save_all(&self, cities: Vec<City>) -> Result<Vec<City>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let mut stored = Vec::with_capacity(cities.len());
        for mut city in cities {
            let id = assign_id(&mut city);
            upsert_city(&mut *tx, &city, &id)
                .await
                .map_err(map_sqlx_error)?;
            stored.push(city);
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query("SELECT 1 FROM cities WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .is_some();

        Ok(exists)
    }
}
