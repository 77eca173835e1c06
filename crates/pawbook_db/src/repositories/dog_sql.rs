//! SQL implementation of the dog repository

use crate::error::DbError;
use crate::repositories::dog::{Dog, DogRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the dog repository
#[derive(Debug, Clone)]
pub struct SqlDogRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlDogRepository {
    /// Create a new SQL dog repository backed by the given client.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

/// Map a dogs row to the domain model.
fn dog_from_row(row: &AnyRow) -> Result<Dog, DbError> {
    Ok(Dog {
        id: row.try_get("id").ok(),
        user_id: row
            .try_get("user_id")
            .map_err(|e| DbError::DecodeError(format!("user_id column: {}", e)))?,
        name: row
            .try_get("name")
            .map_err(|e| DbError::DecodeError(format!("name column: {}", e)))?,
        breed: row.try_get("breed").ok().flatten(),
        avatar_uri: row.try_get("avatar_uri").ok().flatten(),
    })
}

impl DogRepository for SqlDogRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing dogs schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS dogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                breed TEXT,
                avatar_uri TEXT
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Dogs schema initialized successfully");
        Ok(())
    }

    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Dog>, DbError> {
        debug!("Finding all dogs owned by user: {}", user_id);

        let query = r#"
            SELECT id, user_id, name, breed, avatar_uri
            FROM dogs
            WHERE user_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find dogs by owner: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(dog_from_row).collect()
    }

    async fn find_by_id(&self, dog_id: i64) -> Result<Option<Dog>, DbError> {
        debug!("Finding dog: {}", dog_id);

        let query = r#"
            SELECT id, user_id, name, breed, avatar_uri
            FROM dogs
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(dog_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find dog: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        result.as_ref().map(dog_from_row).transpose()
    }

    async fn create(&self, dog: Dog) -> Result<Dog, DbError> {
        debug!("Creating dog {:?} for user {}", dog.name, dog.user_id);

        let query = r#"
            INSERT INTO dogs (user_id, name, breed, avatar_uri)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, breed, avatar_uri
        "#;

        // fetch_all drains the statement so the implicit transaction commits
        // before this call returns (see booking_sql::create).
        let rows = sqlx::query(query)
            .bind(dog.user_id)
            .bind(&dog.name)
            .bind(&dog.breed)
            .bind(&dog.avatar_uri)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert dog: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let row = rows
            .first()
            .ok_or_else(|| DbError::QueryError("insert returned no row".to_string()))?;
        let inserted = dog_from_row(row)?;
        info!("Dog created successfully");
        Ok(inserted)
    }

    async fn delete(&self, dog_id: i64) -> Result<bool, DbError> {
        debug!("Deleting dog: {}", dog_id);

        let query = r#"
            DELETE FROM dogs
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(dog_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete dog: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
