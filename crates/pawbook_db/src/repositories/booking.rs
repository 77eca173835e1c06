//! Repository for slot bookings
//!
//! This module provides the interface for storing and retrieving bookings.
//! Bookings are keyed by their start time; the backing store enforces that
//! at most one booking exists per start time.

use crate::error::DbError;
use chrono::{NaiveDate, NaiveDateTime};

// Re-export Booking from pawbook_common for convenience
pub use pawbook_common::models::Booking;

/// Repository for slot bookings
///
/// This trait defines the interface for storing and retrieving bookings in
/// the database. All operations return a typed result; callers cannot use a
/// payload without first handling failure.
pub trait BookingRepository {
    /// Initialize the database schema
    ///
    /// Creates the bookings table if it doesn't already exist, including the
    /// unique constraint on `start_time`.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find all bookings whose start time falls on the given calendar date.
    ///
    /// The time of day is ignored; the query truncates `start_time` to its
    /// date component.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Find the booking at an exact start time, if any.
    ///
    /// Returns at most one record; `start_time` is unique.
    fn find_by_start_time(
        &self,
        start_time: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Insert a new booking.
    ///
    /// The uniqueness of `start_time` is not pre-checked here; a concurrent
    /// booking of the same slot races against the store's unique constraint
    /// and the loser receives a query error.
    ///
    /// # Returns
    ///
    /// The stored booking with its row id set
    fn create(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<Booking, DbError>> + Send;

    /// Delete the booking at an exact start time.
    ///
    /// Deleting a never-booked timestamp is a no-op, not an error.
    ///
    /// # Returns
    ///
    /// `true` if a booking was deleted, `false` if none existed
    fn delete_by_start_time(
        &self,
        start_time: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
