// File: crates/pawbook_slots/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    AddDogRequest, DaySlotsResponse, SlotActionRequest, SlotActionResponse, SlotResponse,
    UpdateProfileRequest,
};
use crate::logic::SlotState;
use pawbook_common::models::{Dog, User};

#[utoipa::path(
    get,
    path = "/slots",
    params(
        ("date" = String, Query, description = "Calendar date in YYYY-MM-DD format", example = "2024-01-01", format = "date")
    ),
    responses(
        (status = 200, description = "The day's hourly slot states", body = DaySlotsResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Internal error")
    )
)]
fn doc_get_day_slots_handler() {}

#[utoipa::path(
    get,
    path = "/slots/slot",
    params(
        ("date" = String, Query, description = "Calendar date in YYYY-MM-DD format", example = "2024-01-01", format = "date"),
        ("time" = String, Query, description = "Slot start time in HH:MM format", example = "09:00")
    ),
    responses(
        (status = 200, description = "One slot's state", body = SlotResponse),
        (status = 400, description = "Invalid date or time format"),
        (status = 500, description = "Internal error")
    )
)]
fn doc_get_slot_handler() {}

#[utoipa::path(
    post,
    path = "/slots/book",
    request_body(content = SlotActionRequest, example = json!({
        "date": "2024-01-01",
        "time": "09:00"
    })),
    responses(
        (status = 200, description = "Booking result", body = SlotActionResponse,
         example = json!({
             "success": true,
             "message": "Booked 2024-01-01 09:00:00 for a walk."
         })
        ),
        (status = 401, description = "No authenticated session",
         example = json!({
             "success": false,
             "message": "There was an issue booking this time. Please try again."
         })
        ),
        (status = 409, description = "Booking failed (slot taken or store error)",
         example = json!({
             "success": false,
             "message": "There was an issue booking this time. Please try again."
         })
        )
    )
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    post,
    path = "/slots/cancel",
    request_body(content = SlotActionRequest),
    responses(
        (status = 200, description = "Cancellation result", body = SlotActionResponse),
        (status = 401, description = "No authenticated session"),
        (status = 409, description = "Slot is booked by another user"),
        (status = 500, description = "Cancellation failed")
    )
)]
fn doc_cancel_booking_handler() {}

#[utoipa::path(
    get,
    path = "/dogs",
    responses(
        (status = 200, description = "The session user's dogs", body = Vec<Dog>),
        (status = 401, description = "No authenticated session")
    )
)]
fn doc_get_dogs_handler() {}

#[utoipa::path(
    post,
    path = "/dogs",
    request_body(content = AddDogRequest),
    responses(
        (status = 200, description = "The stored dog", body = Dog),
        (status = 400, description = "Invalid dog data"),
        (status = 401, description = "No authenticated session")
    )
)]
fn doc_add_dog_handler() {}

#[utoipa::path(
    delete,
    path = "/dogs/{dog_id}",
    params(
        ("dog_id" = i64, Path, description = "The dog's identity")
    ),
    responses(
        (status = 200, description = "The deleted dog", body = Dog),
        (status = 401, description = "No authenticated session"),
        (status = 404, description = "No such dog on the session user's file")
    )
)]
fn doc_delete_dog_handler() {}

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "The session user's profile", body = User),
        (status = 401, description = "No authenticated session"),
        (status = 404, description = "No profile for the session user")
    )
)]
fn doc_get_profile_handler() {}

#[utoipa::path(
    put,
    path = "/profile",
    request_body(content = UpdateProfileRequest),
    responses(
        (status = 200, description = "The updated profile", body = User),
        (status = 400, description = "Invalid profile data"),
        (status = 401, description = "No authenticated session"),
        (status = 404, description = "No profile for the session user")
    )
)]
fn doc_update_profile_handler() {}

/// OpenAPI documentation for the slot booking feature.
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_day_slots_handler,
        doc_get_slot_handler,
        doc_book_slot_handler,
        doc_cancel_booking_handler,
        doc_get_dogs_handler,
        doc_add_dog_handler,
        doc_delete_dog_handler,
        doc_get_profile_handler,
        doc_update_profile_handler,
    ),
    components(schemas(
        DaySlotsResponse,
        SlotResponse,
        SlotState,
        SlotActionRequest,
        SlotActionResponse,
        AddDogRequest,
        UpdateProfileRequest,
        Dog,
        User,
    )),
    tags((name = "Slots", description = "Dog-walk slot booking endpoints"))
)]
pub struct SlotsApiDoc;
