//! SQL implementation of the booking repository

use crate::error::DbError;
use crate::repositories::booking::{Booking, BookingRepository};
use crate::DbClient;
use chrono::{NaiveDate, NaiveDateTime};
use pawbook_common::models::{format_store_datetime, parse_store_datetime};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingRepository {
    /// Create a new SQL booking repository backed by the given client.
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

/// Map a bookings row to the domain model.
///
/// Start times are stored as text in the backing store's wall-clock format;
/// the Any driver does not decode chrono types directly.
fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let start_text: String = row
        .try_get("start_time")
        .map_err(|e| DbError::DecodeError(format!("start_time column: {}", e)))?;
    let start_time = parse_store_datetime(&start_text)
        .map_err(|e| DbError::DecodeError(format!("start_time value {:?}: {}", start_text, e)))?;

    Ok(Booking {
        id: row.try_get("id").ok(),
        start_time,
        user_id: row
            .try_get("user_id")
            .map_err(|e| DbError::DecodeError(format!("user_id column: {}", e)))?,
        dog_id: row
            .try_get("dog_id")
            .map_err(|e| DbError::DecodeError(format!("dog_id column: {}", e)))?,
    })
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bookings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                start_time TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                dog_id INTEGER NOT NULL,
                UNIQUE(start_time)
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Bookings schema initialized successfully");
        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, DbError> {
        debug!("Finding bookings on date: {}", date);

        // date() truncates the stored start_time to its calendar date
        let query = r#"
            SELECT id, start_time, user_id, dog_id
            FROM bookings
            WHERE date(start_time) = $1
        "#;

        let rows = sqlx::query(query)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find bookings by date: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn find_by_start_time(
        &self,
        start_time: NaiveDateTime,
    ) -> Result<Option<Booking>, DbError> {
        debug!("Finding booking at start time: {}", start_time);

        let query = r#"
            SELECT id, start_time, user_id, dog_id
            FROM bookings
            WHERE start_time = $1
        "#;

        let result = sqlx::query(query)
            .bind(format_store_datetime(start_time))
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        result.as_ref().map(booking_from_row).transpose()
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DbError> {
        debug!(
            "Creating booking at {} for user {}",
            booking.start_time, booking.user_id
        );

        // No pre-check for an existing booking: the unique constraint on
        // start_time decides the winner of a concurrent booking race.
        let query = r#"
            INSERT INTO bookings (start_time, user_id, dog_id)
            VALUES ($1, $2, $3)
            RETURNING id, start_time, user_id, dog_id
        "#;

        // fetch_all drains the statement so the implicit transaction commits
        // before this call returns; fetch_one can hand back the RETURNING row
        // while the write is still invisible to other pool connections.
        let rows = sqlx::query(query)
            .bind(format_store_datetime(booking.start_time))
            .bind(booking.user_id)
            .bind(booking.dog_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let row = rows
            .first()
            .ok_or_else(|| DbError::QueryError("insert returned no row".to_string()))?;
        let inserted = booking_from_row(row)?;
        info!("Booking created successfully");
        Ok(inserted)
    }

    async fn delete_by_start_time(&self, start_time: NaiveDateTime) -> Result<bool, DbError> {
        debug!("Deleting booking at start time: {}", start_time);

        let query = r#"
            DELETE FROM bookings
            WHERE start_time = $1
        "#;

        let result = sqlx::query(query)
            .bind(format_store_datetime(start_time))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
