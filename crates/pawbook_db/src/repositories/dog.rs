//! Repository for dogs
//!
//! This module provides the interface for storing and retrieving dogs.
//! Each dog is owned by exactly one user.

use crate::error::DbError;

// Re-export Dog from pawbook_common for convenience
pub use pawbook_common::models::Dog;

/// Repository for dogs
pub trait DogRepository {
    /// Initialize the database schema
    ///
    /// Creates the dogs table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find all dogs owned by the given user.
    ///
    /// Order is unspecified. Never returns dogs belonging to a different user.
    fn find_by_owner(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Dog>, DbError>> + Send;

    /// Find a dog by its identity.
    fn find_by_id(
        &self,
        dog_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Dog>, DbError>> + Send;

    /// Insert a new dog owned by `dog.user_id`.
    ///
    /// # Returns
    ///
    /// The stored dog with its row id set
    fn create(&self, dog: Dog) -> impl std::future::Future<Output = Result<Dog, DbError>> + Send;

    /// Delete a dog by its identity.
    ///
    /// # Returns
    ///
    /// `true` if a dog was deleted, `false` if none existed
    fn delete(&self, dog_id: i64)
        -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
