//! Repository for user profiles
//!
//! User identities are issued by the external authentication collaborator;
//! this repository only reads and updates the profile fields stored locally.

use crate::error::DbError;

// Re-export User from pawbook_common for convenience
pub use pawbook_common::models::User;

/// Repository for user profiles
pub trait UserRepository {
    /// Initialize the database schema
    ///
    /// Creates the users table if it doesn't already exist. Rows are keyed
    /// by the externally issued user id, so there is no autoincrement.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find a user by identity.
    fn find_by_id(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Update the user's profile fields.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if no user with that identity exists
    fn update_profile(
        &self,
        user_id: i64,
        full_name: &str,
        address: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;
}
