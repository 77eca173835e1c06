//! Factories for creating entity repositories
//!
//! These factories create the SQL repositories from a database client,
//! keeping the wiring behind the shared `RepositoryFactory` seam.

use crate::repositories::booking_sql::SqlBookingRepository;
use crate::repositories::dog_sql::SqlDogRepository;
use crate::repositories::user_sql::SqlUserRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating booking repositories
#[derive(Debug, Clone, Default)]
pub struct BookingRepositoryFactory;

impl BookingRepositoryFactory {
    /// Create a new booking repository factory
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlBookingRepository, DbClient> for BookingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlBookingRepository {
        SqlBookingRepository::new(db_client)
    }
}

/// Factory for creating dog repositories
#[derive(Debug, Clone, Default)]
pub struct DogRepositoryFactory;

impl DogRepositoryFactory {
    /// Create a new dog repository factory
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlDogRepository, DbClient> for DogRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlDogRepository {
        SqlDogRepository::new(db_client)
    }
}

/// Factory for creating user repositories
#[derive(Debug, Clone, Default)]
pub struct UserRepositoryFactory;

impl UserRepositoryFactory {
    /// Create a new user repository factory
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlUserRepository, DbClient> for UserRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlUserRepository {
        SqlUserRepository::new(db_client)
    }
}
