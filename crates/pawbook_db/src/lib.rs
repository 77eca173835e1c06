//! Database integration for Pawbook
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library, plus the
//! repositories for the three record sets the booking system persists:
//! bookings, dogs, and users.
//!
//! The client is injected into each repository at construction (there is no
//! module-level global), so tests can point a repository at a throwaway
//! database.
//!
//! # Example
//!
//! ```rust,no_run
//! use pawbook_db::{BookingRepository, DbClient, SqlBookingRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DbClient::from_url("sqlite:pawbook.db").await?;
//!     let bookings = SqlBookingRepository::new(client);
//!     bookings.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

// Re-export the client, factory, and repository traits for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

// Re-export the repositories module components for ease of use
pub use repositories::{
    Booking, BookingRepository, BookingRepositoryFactory, Dog, DogRepository, DogRepositoryFactory,
    SqlBookingRepository, SqlDogRepository, SqlUserRepository, User, UserRepository,
    UserRepositoryFactory,
};
