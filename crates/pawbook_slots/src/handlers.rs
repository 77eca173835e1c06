// --- File: crates/pawbook_slots/src/handlers.rs ---
use crate::auth::bearer_credential;
use crate::logic::{
    day_slots, slot_start, SlotContext, SlotError, SlotSnapshot, SlotState, SlotView,
    BOOKING_ERROR_MESSAGE, CANCEL_ERROR_MESSAGE,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::NaiveDate;
use pawbook_common::error::{not_found, validation_error, PawbookError};
use pawbook_common::models::format_store_datetime;
use pawbook_common::services::{BoxedError, SessionIdentity, SessionProvider};
use pawbook_config::AppConfig;
use pawbook_db::{
    BookingRepository, Dog, DogRepository, SqlBookingRepository, SqlDogRepository,
    SqlUserRepository, User, UserRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

// Shared state needed by the slot handlers
#[derive(Clone)]
pub struct SlotsState {
    pub config: Arc<AppConfig>,
    pub bookings: SqlBookingRepository,
    pub dogs: SqlDogRepository,
    pub users: SqlUserRepository,
    pub sessions: Arc<dyn SessionProvider<Error = BoxedError>>,
}

impl SlotsState {
    fn slot_context(&self) -> SlotContext<SqlBookingRepository, SqlDogRepository> {
        SlotContext {
            bookings: self.bookings.clone(),
            dogs: self.dogs.clone(),
            sessions: self.sessions.clone(),
        }
    }

    /// Resolve the request's session identity, treating an absent credential
    /// as an anonymous viewer.
    async fn optional_session(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<SessionIdentity>, PawbookError> {
        match bearer_credential(headers) {
            Some(credential) => self
                .sessions
                .resolve_session(credential)
                .await
                .map_err(|e| PawbookError::AuthError(e.to_string())),
            None => Ok(None),
        }
    }

    /// Resolve the request's session identity, rejecting anonymous callers.
    async fn require_session(&self, headers: &HeaderMap) -> Result<SessionIdentity, PawbookError> {
        self.optional_session(headers)
            .await?
            .ok_or_else(|| PawbookError::AuthError("missing or unknown session".to_string()))
    }
}

// --- Wire types ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DayQuery {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotQuery {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Slot start time in HH:MM format
    pub time: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotActionRequest {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Slot start time in HH:MM format
    pub time: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotResponse {
    /// Slot start time in HH:MM format
    pub time: String,
    /// Full start timestamp in the store's wall-clock format
    pub start_time: String,
    #[serde(flatten)]
    pub state: SlotState,
    /// Whether the booking action is available to the viewer
    pub can_book: bool,
}

impl SlotResponse {
    fn from_snapshot(snapshot: &SlotSnapshot) -> Self {
        Self {
            time: snapshot.start_time.format("%H:%M").to_string(),
            start_time: format_store_datetime(snapshot.start_time),
            state: snapshot.state(),
            can_book: snapshot.can_book(),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DaySlotsResponse {
    pub date: String,
    pub slots: Vec<SlotResponse>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotActionResponse {
    pub success: bool,
    pub message: String,
}

impl SlotActionResponse {
    fn failure(message: &str) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.to_string(),
        })
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddDogRequest {
    pub name: String,
    pub breed: Option<String>,
    pub avatar_uri: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub address: String,
}

// --- Slot handlers ---

/// Handler for the day view: every hourly slot on the date with its state.
#[axum::debug_handler]
pub async fn get_day_slots_handler(
    State(state): State<Arc<SlotsState>>,
    Query(query): Query<DayQuery>,
    headers: HeaderMap,
) -> Result<Json<DaySlotsResponse>, PawbookError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| validation_error("Invalid date format (YYYY-MM-DD)"))?;

    let viewer = state.optional_session(&headers).await?;
    let viewer_id = viewer.map(|identity| identity.user_id);

    let bookings = state.bookings.find_by_date(date).await?;
    let dogs = match viewer_id {
        Some(user_id) => state.dogs.find_by_owner(user_id).await?,
        None => Vec::new(),
    };

    let slots_config = state.config.slots.clone().unwrap_or_default();
    let slots = day_slots(&slots_config, date)
        .into_iter()
        .map(|start_time| {
            let snapshot = SlotSnapshot {
                start_time,
                viewer: viewer_id,
                booking: bookings
                    .iter()
                    .find(|booking| booking.start_time == start_time)
                    .cloned(),
                dogs: dogs.clone(),
            };
            SlotResponse::from_snapshot(&snapshot)
        })
        .collect();

    Ok(Json(DaySlotsResponse {
        date: query.date,
        slots,
    }))
}

/// Handler for a single slot's state.
#[axum::debug_handler]
pub async fn get_slot_handler(
    State(state): State<Arc<SlotsState>>,
    Query(query): Query<SlotQuery>,
    headers: HeaderMap,
) -> Result<Json<SlotResponse>, PawbookError> {
    let start_time = slot_start(&query.date, &query.time)
        .map_err(|err| validation_error(err.to_string()))?;

    let mut view = SlotView::new(start_time);
    view.refresh(&state.slot_context(), bearer_credential(&headers))
        .await;

    match view.snapshot() {
        Some(snapshot) => Ok(Json(SlotResponse::from_snapshot(snapshot))),
        None => {
            let message = view
                .load_state()
                .failure()
                .unwrap_or("slot data not loaded")
                .to_string();
            Err(PawbookError::InternalError(message))
        }
    }
}

/// Handler to book a slot for the session user's first dog on file.
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
    Json(request): Json<SlotActionRequest>,
) -> (StatusCode, Json<SlotActionResponse>) {
    let start_time = match slot_start(&request.date, &request.time) {
        Ok(start_time) => start_time,
        Err(err) => {
            warn!("Rejected booking request: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                SlotActionResponse::failure(BOOKING_ERROR_MESSAGE),
            );
        }
    };

    // Only the day view's hourly grid is bookable; an off-grid timestamp
    // would persist a booking no slot ever displays.
    let slots_config = state.config.slots.clone().unwrap_or_default();
    if !day_slots(&slots_config, start_time.date()).contains(&start_time) {
        warn!("Rejected booking request outside the slot grid: {}", start_time);
        return (
            StatusCode::BAD_REQUEST,
            SlotActionResponse::failure(BOOKING_ERROR_MESSAGE),
        );
    }

    let mut view = SlotView::new(start_time);
    match view
        .book(&state.slot_context(), bearer_credential(&headers))
        .await
    {
        Ok(booking) => (
            StatusCode::OK,
            Json(SlotActionResponse {
                success: true,
                message: format!("Booked {} for a walk.", booking.start_time),
            }),
        ),
        Err(SlotError::MissingSession) => (
            StatusCode::UNAUTHORIZED,
            SlotActionResponse::failure(BOOKING_ERROR_MESSAGE),
        ),
        Err(err) => {
            // Failures are not classified further: a lost booking race and a
            // plain database error both collapse to the fixed message.
            error!("Booking slot {} failed: {}", start_time, err);
            (
                StatusCode::CONFLICT,
                SlotActionResponse::failure(BOOKING_ERROR_MESSAGE),
            )
        }
    }
}

/// Handler to cancel the booking at a slot's exact timestamp.
#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
    Json(request): Json<SlotActionRequest>,
) -> (StatusCode, Json<SlotActionResponse>) {
    let start_time = match slot_start(&request.date, &request.time) {
        Ok(start_time) => start_time,
        Err(err) => {
            warn!("Rejected cancel request: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                SlotActionResponse::failure(CANCEL_ERROR_MESSAGE),
            );
        }
    };

    let mut view = SlotView::new(start_time);
    match view
        .cancel(&state.slot_context(), bearer_credential(&headers))
        .await
    {
        Ok(removed) => (
            StatusCode::OK,
            Json(SlotActionResponse {
                success: true,
                message: if removed {
                    "Booking canceled.".to_string()
                } else {
                    "No booking to cancel.".to_string()
                },
            }),
        ),
        Err(SlotError::MissingSession) => (
            StatusCode::UNAUTHORIZED,
            SlotActionResponse::failure(CANCEL_ERROR_MESSAGE),
        ),
        Err(SlotError::NotSlotOwner) => (
            StatusCode::CONFLICT,
            SlotActionResponse::failure(CANCEL_ERROR_MESSAGE),
        ),
        Err(err) => {
            error!("Canceling slot {} failed: {}", start_time, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SlotActionResponse::failure(CANCEL_ERROR_MESSAGE),
            )
        }
    }
}

// --- Dog handlers ---

/// Handler listing the session user's dogs.
#[axum::debug_handler]
pub async fn get_dogs_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Dog>>, PawbookError> {
    let viewer = state.require_session(&headers).await?;
    let dogs = state.dogs.find_by_owner(viewer.user_id).await?;
    Ok(Json(dogs))
}

/// Handler adding a dog to the session user's file.
#[axum::debug_handler]
pub async fn add_dog_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
    Json(request): Json<AddDogRequest>,
) -> Result<Json<Dog>, PawbookError> {
    let viewer = state.require_session(&headers).await?;

    if request.name.trim().is_empty() {
        return Err(validation_error("Dog name must not be empty"));
    }

    let dog = state
        .dogs
        .create(Dog::new(
            viewer.user_id,
            request.name,
            request.breed,
            request.avatar_uri,
        ))
        .await?;
    Ok(Json(dog))
}

/// Handler removing one of the session user's dogs.
#[axum::debug_handler]
pub async fn delete_dog_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
    Path(dog_id): Path<i64>,
) -> Result<Json<Dog>, PawbookError> {
    let viewer = state.require_session(&headers).await?;

    // Another user's dog is indistinguishable from a missing one.
    let dog = state
        .dogs
        .find_by_id(dog_id)
        .await?
        .filter(|dog| dog.user_id == viewer.user_id)
        .ok_or_else(|| not_found(format!("No dog with id {}", dog_id)))?;

    state.dogs.delete(dog_id).await?;
    Ok(Json(dog))
}

// --- Profile handlers ---

/// Handler returning the session user's profile.
#[axum::debug_handler]
pub async fn get_profile_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
) -> Result<Json<User>, PawbookError> {
    let viewer = state.require_session(&headers).await?;
    let user = state
        .users
        .find_by_id(viewer.user_id)
        .await?
        .ok_or_else(|| not_found(format!("No profile for user {}", viewer.user_id)))?;
    Ok(Json(user))
}

/// Handler updating the session user's profile fields.
#[axum::debug_handler]
pub async fn update_profile_handler(
    State(state): State<Arc<SlotsState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, PawbookError> {
    let viewer = state.require_session(&headers).await?;

    if request.full_name.trim().is_empty() {
        return Err(validation_error("Full name must not be empty"));
    }
    if request.address.trim().is_empty() {
        return Err(validation_error("Address must not be empty"));
    }

    let user = state
        .users
        .update_profile(viewer.user_id, &request.full_name, &request.address)
        .await?
        .ok_or_else(|| not_found(format!("No profile for user {}", viewer.user_id)))?;
    Ok(Json(user))
}
