// --- File: crates/pawbook_slots/src/logic.rs ---
//! Slot booking state machine.
//!
//! A slot is one bookable hour identified by date + time. Its presentation is
//! recomputed from persisted data on every refresh; there is no in-memory
//! transition table. The asynchronous loading steps are modelled explicitly
//! (`LoadState`) so tests can drive every state without a rendering
//! environment.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pawbook_common::services::{BoxedError, SessionIdentity, SessionProvider};
use pawbook_config::SlotsConfig;
use pawbook_db::{Booking, BookingRepository, DbError, Dog, DogRepository};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed user-facing message for a failed booking action.
pub const BOOKING_ERROR_MESSAGE: &str = "There was an issue booking this time. Please try again.";
/// Fixed user-facing message for a failed cancellation action.
pub const CANCEL_ERROR_MESSAGE: &str = "There was an issue canceling this time. Please try again.";

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Failed to parse slot time: {0}")]
    TimeParse(String),
    #[error("No authenticated session")]
    MissingSession,
    #[error("No dog on file for user {0}")]
    NoDogOnFile(i64),
    #[error("Slot is booked by another user")]
    NotSlotOwner,
    #[error("Session lookup failed: {0}")]
    Session(String),
    #[error(transparent)]
    Repo(#[from] DbError),
}

impl From<BoxedError> for SlotError {
    fn from(err: BoxedError) -> Self {
        SlotError::Session(err.to_string())
    }
}

/// Combine a slot's date and time into its start timestamp.
///
/// Accepts `YYYY-MM-DD` dates with `HH:MM` or `HH:MM:SS` times.
pub fn slot_start(date: &str, time: &str) -> Result<NaiveDateTime, SlotError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| SlotError::TimeParse(format!("date {:?}: {}", date, e)))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|e| SlotError::TimeParse(format!("time {:?}: {}", time, e)))?;
    Ok(date.and_time(time))
}

/// Enumerate the day's hourly slot start times from the configured hours.
pub fn day_slots(config: &SlotsConfig, date: NaiveDate) -> Vec<NaiveDateTime> {
    (config.day_start_hour..config.day_end_hour)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .collect()
}

/// The three-state presentation of a slot, derived from fetched data.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SlotState {
    /// No booking exists at this start time.
    Open,
    /// The viewer's own booking occupies this slot.
    BookedByMe {
        /// Name of the booked dog, when it is still on the viewer's file.
        dog_name: Option<String>,
    },
    /// Another user's booking occupies this slot; display only.
    BookedByOther,
}

impl SlotState {
    /// Short label for logs and wire formats.
    pub fn label(&self) -> &'static str {
        match self {
            SlotState::Open => "open",
            SlotState::BookedByMe { .. } => "booked_by_me",
            SlotState::BookedByOther => "booked_by_other",
        }
    }
}

/// Explicit asynchronous data-loading state machine: idle until the first
/// refresh, loading while fetches are in flight, then loaded or failed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The loaded value, if the last refresh succeeded.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if the last refresh failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything one refresh fetches for a slot.
///
/// The presentation is a pure function of this snapshot, so the derivation
/// is testable with hand-built values.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSnapshot {
    pub start_time: NaiveDateTime,
    /// The viewer's identity, if a session credential resolved.
    pub viewer: Option<i64>,
    /// The booking at this start time, if any.
    pub booking: Option<Booking>,
    /// The viewer's dogs; empty for anonymous viewers.
    pub dogs: Vec<Dog>,
}

impl SlotSnapshot {
    /// Derive the three-state presentation.
    pub fn state(&self) -> SlotState {
        match (&self.booking, self.viewer) {
            (None, _) => SlotState::Open,
            (Some(booking), Some(viewer)) if booking.user_id == viewer => SlotState::BookedByMe {
                dog_name: self
                    .dogs
                    .iter()
                    .find(|dog| dog.id == Some(booking.dog_id))
                    .map(|dog| dog.name.clone()),
            },
            (Some(_), _) => SlotState::BookedByOther,
        }
    }

    /// Whether the booking action is available to the viewer.
    ///
    /// Requires an open slot, a known session identity, and at least one dog
    /// on file.
    pub fn can_book(&self) -> bool {
        self.booking.is_none() && self.viewer.is_some() && !self.dogs.is_empty()
    }
}

/// The dependencies a slot composes: the bookings and dogs data-access
/// layers plus the external session lookup.
#[derive(Clone)]
pub struct SlotContext<B, D> {
    pub bookings: B,
    pub dogs: D,
    pub sessions: Arc<dyn SessionProvider<Error = BoxedError>>,
}

impl<B, D> SlotContext<B, D>
where
    B: BookingRepository + Sync,
    D: DogRepository + Sync,
{
    /// Resolve the viewer's identity from an optional session credential.
    ///
    /// An absent credential yields an anonymous viewer, not an error.
    async fn viewer(&self, credential: Option<&str>) -> Result<Option<SessionIdentity>, SlotError> {
        match credential {
            Some(credential) => Ok(self.sessions.resolve_session(credential).await?),
            None => Ok(None),
        }
    }
}

/// One bookable hour and its load lifecycle.
#[derive(Debug)]
pub struct SlotView {
    start_time: NaiveDateTime,
    state: LoadState<SlotSnapshot>,
}

impl SlotView {
    /// Create a view for the slot starting at the given timestamp.
    pub fn new(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            state: LoadState::Idle,
        }
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn load_state(&self) -> &LoadState<SlotSnapshot> {
        &self.state
    }

    /// The loaded snapshot, if the last refresh succeeded.
    pub fn snapshot(&self) -> Option<&SlotSnapshot> {
        self.state.loaded()
    }

    /// Refetch the slot's data and recompute its snapshot.
    ///
    /// The session identity is resolved first; the booking and the viewer's
    /// dog list are then fetched with no ordering guarantee between them.
    pub async fn refresh<B, D>(
        &mut self,
        ctx: &SlotContext<B, D>,
        credential: Option<&str>,
    ) -> &LoadState<SlotSnapshot>
    where
        B: BookingRepository + Sync,
        D: DogRepository + Sync,
    {
        self.state = LoadState::Loading;

        let viewer = match ctx.viewer(credential).await {
            Ok(identity) => identity.map(|identity| identity.user_id),
            Err(err) => {
                warn!("Slot refresh failed resolving session: {}", err);
                self.state = LoadState::Failed(err.to_string());
                return &self.state;
            }
        };

        let booking_fut = ctx.bookings.find_by_start_time(self.start_time);
        let dogs_fut = async {
            match viewer {
                Some(user_id) => ctx.dogs.find_by_owner(user_id).await,
                None => Ok(Vec::new()),
            }
        };
        let (booking, dogs) = tokio::join!(booking_fut, dogs_fut);

        self.state = match (booking, dogs) {
            (Ok(booking), Ok(dogs)) => LoadState::Loaded(SlotSnapshot {
                start_time: self.start_time,
                viewer,
                booking,
                dogs,
            }),
            (Err(err), _) | (_, Err(err)) => {
                warn!("Slot refresh failed: {}", err);
                LoadState::Failed(err.to_string())
            }
        };
        &self.state
    }

    /// Book this slot for the viewer's first dog on file.
    ///
    /// Using the first dog is a documented limitation carried over from the
    /// original design; multi-dog selection is deferred. Uniqueness of the
    /// start time is not pre-checked; a lost race surfaces as a repository
    /// error. On success the view refreshes to the persisted state.
    pub async fn book<B, D>(
        &mut self,
        ctx: &SlotContext<B, D>,
        credential: Option<&str>,
    ) -> Result<Booking, SlotError>
    where
        B: BookingRepository + Sync,
        D: DogRepository + Sync,
    {
        let viewer = ctx
            .viewer(credential)
            .await?
            .ok_or(SlotError::MissingSession)?;

        let dogs = ctx.dogs.find_by_owner(viewer.user_id).await?;
        let dog = dogs
            .first()
            .and_then(|dog| dog.id)
            .ok_or(SlotError::NoDogOnFile(viewer.user_id))?;

        debug!(
            "Booking slot {} for user {} with dog {}",
            self.start_time, viewer.user_id, dog
        );
        let booking = ctx
            .bookings
            .create(Booking::new(self.start_time, viewer.user_id, dog))
            .await?;

        self.refresh(ctx, credential).await;
        Ok(booking)
    }

    /// Cancel the booking at this slot's exact timestamp.
    ///
    /// Cancelling a never-booked slot is a no-op. A slot booked by a
    /// different user cannot be cancelled by the viewer.
    ///
    /// # Returns
    ///
    /// `true` if a booking was removed, `false` for the no-op case
    pub async fn cancel<B, D>(
        &mut self,
        ctx: &SlotContext<B, D>,
        credential: Option<&str>,
    ) -> Result<bool, SlotError>
    where
        B: BookingRepository + Sync,
        D: DogRepository + Sync,
    {
        let viewer = ctx
            .viewer(credential)
            .await?
            .ok_or(SlotError::MissingSession)?;

        let removed = match ctx.bookings.find_by_start_time(self.start_time).await? {
            None => false,
            Some(booking) if booking.user_id != viewer.user_id => {
                return Err(SlotError::NotSlotOwner);
            }
            Some(_) => {
                debug!(
                    "Canceling booking at {} for user {}",
                    self.start_time, viewer.user_id
                );
                ctx.bookings.delete_by_start_time(self.start_time).await?
            }
        };

        self.refresh(ctx, credential).await;
        Ok(removed)
    }
}
