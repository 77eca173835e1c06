// --- File: crates/services/pawbook_backend/src/app_state.rs ---
//! Application state shared across all routes.

use crate::service_factory::PawbookServiceFactory;
use pawbook_common::services::{BoxedError, ServiceFactory, SessionProvider};
use pawbook_config::AppConfig;
use pawbook_db::{
    BookingRepository, BookingRepositoryFactory, DbClient, DbClientFactory, DbError,
    DogRepository, DogRepositoryFactory, RepositoryFactory, SqlBookingRepository,
    SqlDogRepository, SqlUserRepository, UserRepository, UserRepositoryFactory,
};
use pawbook_slots::auth::StaticSessionProvider;
use pawbook_slots::SlotsState;
use std::sync::Arc;
use tracing::info;

/// Everything the routers need: configuration, the database client, the
/// repositories over it, and the resolved session lookup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
    pub bookings: SqlBookingRepository,
    pub dogs: SqlDogRepository,
    pub users: SqlUserRepository,
    pub sessions: Arc<dyn SessionProvider<Error = BoxedError>>,
}

impl AppState {
    /// Connect to the configured database, ensure the schema exists, and
    /// resolve the session lookup through the service factory.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, DbError> {
        let db = DbClientFactory::new().from_app_config(&config).await?;

        let bookings = BookingRepositoryFactory::new().create_repository(db.clone());
        let dogs = DogRepositoryFactory::new().create_repository(db.clone());
        let users = UserRepositoryFactory::new().create_repository(db.clone());
        bookings.init_schema().await?;
        dogs.init_schema().await?;
        users.init_schema().await?;
        info!("Database schema ready");

        let service_factory = PawbookServiceFactory::new(&config);
        let sessions = service_factory
            .session_provider()
            .unwrap_or_else(|| Arc::new(StaticSessionProvider::default()));

        Ok(Self {
            config,
            db,
            bookings,
            dogs,
            users,
            sessions,
        })
    }

    /// State handed to the slot booking routes.
    pub fn slots_state(&self) -> SlotsState {
        SlotsState {
            config: self.config.clone(),
            bookings: self.bookings.clone(),
            dogs: self.dogs.clone(),
            users: self.users.clone(),
            sessions: self.sessions.clone(),
        }
    }
}
