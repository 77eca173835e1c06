//! Repository modules for database access
//!
//! This module contains repository traits and implementations for the three
//! record sets this system persists: bookings, dogs, and users.

pub mod booking;
pub mod booking_sql;
pub mod dog;
pub mod dog_sql;
pub mod factories;
pub mod user;
pub mod user_sql;

// Re-export the repositories and factories for ease of use
pub use booking::{Booking, BookingRepository};
pub use booking_sql::SqlBookingRepository;
pub use dog::{Dog, DogRepository};
pub use dog_sql::SqlDogRepository;
pub use factories::{BookingRepositoryFactory, DogRepositoryFactory, UserRepositoryFactory};
pub use user::{User, UserRepository};
pub use user_sql::SqlUserRepository;
