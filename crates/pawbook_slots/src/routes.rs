// --- File: crates/pawbook_slots/src/routes.rs ---

use crate::handlers::{
    add_dog_handler, book_slot_handler, cancel_booking_handler, delete_dog_handler,
    get_day_slots_handler, get_dogs_handler, get_profile_handler, get_slot_handler,
    update_profile_handler, SlotsState,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all routes for the slot booking feature.
///
/// The handlers share one `SlotsState`: the repositories over the injected
/// database client plus the external session lookup.
pub fn routes(state: SlotsState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/slots", get(get_day_slots_handler))
        .route("/slots/slot", get(get_slot_handler))
        .route("/slots/book", post(book_slot_handler))
        .route("/slots/cancel", post(cancel_booking_handler))
        .route("/dogs", get(get_dogs_handler).post(add_dog_handler))
        .route("/dogs/{dog_id}", delete(delete_dog_handler))
        .route(
            "/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .with_state(state)
}
