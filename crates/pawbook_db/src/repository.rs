//! Repository traits for database access
//!
//! This module defines the factory trait shared by the entity repositories.
//! Repositories themselves are bespoke traits per entity (bookings are keyed
//! by start time, dogs by owner, users by identity), so there is no common
//! CRUD supertrait; the factory is the shared seam for wiring them up.

/// A trait for database repository factories
///
/// This trait defines a factory for creating repository instances.
/// It is generic over the repository type and the configuration type.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the repository
    fn create_repository(&self, config: C) -> R;
}
