//! SQL implementation of the user repository

use crate::error::DbError;
use crate::repositories::user::{User, UserRepository};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlUserRepository {
    /// Create a new SQL user repository backed by the given client.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

/// Map a users row to the domain model.
fn user_from_row(row: &AnyRow) -> Result<User, DbError> {
    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| DbError::DecodeError(format!("id column: {}", e)))?,
        full_name: row
            .try_get("full_name")
            .map_err(|e| DbError::DecodeError(format!("full_name column: {}", e)))?,
        address: row
            .try_get("address")
            .map_err(|e| DbError::DecodeError(format!("address column: {}", e)))?,
    })
}

impl UserRepository for SqlUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                full_name TEXT NOT NULL,
                address TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Users schema initialized successfully");
        Ok(())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DbError> {
        debug!("Finding user: {}", user_id);

        let query = r#"
            SELECT id, full_name, address
            FROM users
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        result.as_ref().map(user_from_row).transpose()
    }

    async fn update_profile(
        &self,
        user_id: i64,
        full_name: &str,
        address: &str,
    ) -> Result<Option<User>, DbError> {
        debug!("Updating profile for user: {}", user_id);

        let query = r#"
            UPDATE users
            SET full_name = $1, address = $2
            WHERE id = $3
            RETURNING id, full_name, address
        "#;

        // fetch_all drains the statement so the implicit transaction commits
        // before this call returns (see booking_sql::create).
        let rows = sqlx::query(query)
            .bind(full_name)
            .bind(address)
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update user profile: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let updated = rows.first().map(user_from_row).transpose()?;
        if updated.is_some() {
            info!("User profile updated successfully");
        }
        Ok(updated)
    }
}
