// --- File: crates/pawbook_common/src/models.rs ---

// This file contains data structures and models that are common across the application.

use chrono::{NaiveDateTime, ParseResult};
use serde::{Deserialize, Serialize};

/// Wall-clock timestamp format used by the backing store for slot start times.
pub const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a start time the way the backing store serializes it.
pub fn format_store_datetime(value: NaiveDateTime) -> String {
    value.format(STORE_DATETIME_FORMAT).to_string()
}

/// Parse a start time from the backing store's serialization.
pub fn parse_store_datetime(value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORE_DATETIME_FORMAT)
}

/// Represents a persisted reservation of one hour-long slot.
///
/// At most one booking exists per `start_time`; the backing store enforces
/// this with a unique constraint. Bookings are created and deleted, never
/// updated in place.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// The unique identifier for this booking row
    pub id: Option<i64>,

    /// The start of the booked hour (unique across all bookings)
    pub start_time: NaiveDateTime,

    /// The user who booked the slot
    pub user_id: i64,

    /// The dog the walk is booked for
    pub dog_id: i64,
}

impl Booking {
    /// Create a new, not yet persisted booking.
    pub fn new(start_time: NaiveDateTime, user_id: i64, dog_id: i64) -> Self {
        Self {
            id: None,
            start_time,
            user_id,
            dog_id,
        }
    }
}

/// Represents a dog owned by a user.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dog {
    /// The unique identifier for this dog
    pub id: Option<i64>,

    /// The owning user
    pub user_id: i64,

    /// The dog's name
    pub name: String,

    /// The dog's breed, if recorded
    pub breed: Option<String>,

    /// URI of the dog's avatar image, if any
    pub avatar_uri: Option<String>,
}

impl Dog {
    /// Create a new, not yet persisted dog.
    pub fn new(user_id: i64, name: String, breed: Option<String>, avatar_uri: Option<String>) -> Self {
        Self {
            id: None,
            user_id,
            name,
            breed,
            avatar_uri,
        }
    }
}

/// Represents a user profile.
///
/// User identity is issued by the external authentication collaborator;
/// this record only carries the locally editable profile fields.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// The identity issued by the authentication collaborator
    pub id: i64,

    /// The user's full name
    pub full_name: String,

    /// The user's street address
    pub address: String,
}
