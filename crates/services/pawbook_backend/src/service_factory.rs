// --- File: crates/services/pawbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module wires the external collaborators the backend consumes. The
//! only one today is the session lookup; deployments without a real auth
//! service run on the static token table from configuration.

use pawbook_common::services::{BoxedError, ServiceFactory, SessionProvider};
use pawbook_config::AppConfig;
use pawbook_slots::auth::StaticSessionProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// Service factory for the backend binary.
pub struct PawbookServiceFactory {
    session_provider: Arc<dyn SessionProvider<Error = BoxedError>>,
}

impl PawbookServiceFactory {
    /// Create a new service factory from the application configuration.
    pub fn new(config: &Arc<AppConfig>) -> Self {
        let session_provider: Arc<dyn SessionProvider<Error = BoxedError>> = match config
            .auth
            .as_ref()
        {
            Some(auth) if !auth.tokens.is_empty() => {
                info!(
                    "Session lookup backed by {} configured token(s)",
                    auth.tokens.len()
                );
                Arc::new(StaticSessionProvider::from_config(auth))
            }
            _ => {
                warn!("No auth tokens configured; every caller will be anonymous");
                Arc::new(StaticSessionProvider::default())
            }
        };

        Self { session_provider }
    }
}

impl ServiceFactory for PawbookServiceFactory {
    fn session_provider(&self) -> Option<Arc<dyn SessionProvider<Error = BoxedError>>> {
        Some(self.session_provider.clone())
    }
}
