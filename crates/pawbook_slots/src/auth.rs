// --- File: crates/pawbook_slots/src/auth.rs ---
//! Session credential handling for the slot routes.
//!
//! Authentication itself is an external collaborator; this module only
//! extracts the bearer credential from a request and provides a static
//! token-table implementation of the session lookup for deployments that
//! run without a full auth service.

use axum::http::{header, HeaderMap};
use pawbook_common::services::{BoxFuture, BoxedError, SessionIdentity, SessionProvider};
use pawbook_config::AuthConfig;
use std::collections::HashMap;
use tracing::debug;

/// Extract the bearer credential from the request headers, if present.
///
/// A missing or malformed Authorization header renders the caller anonymous
/// rather than failing the request; booked slots are still visible to
/// anonymous viewers.
pub fn bearer_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Session lookup backed by a static token table from configuration.
///
/// Each configured token maps to one user id. Unknown tokens resolve to
/// `None`, the same as an expired session.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    tokens: HashMap<String, i64>,
}

impl StaticSessionProvider {
    /// Build the provider from the auth section of the configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|entry| (entry.token.clone(), entry.user_id))
            .collect();
        Self { tokens }
    }

    /// Build the provider from explicit token/user pairs.
    pub fn with_tokens<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        Self {
            tokens: pairs.into_iter().collect(),
        }
    }
}

impl SessionProvider for StaticSessionProvider {
    type Error = BoxedError;

    fn resolve_session(
        &self,
        credential: &str,
    ) -> BoxFuture<'_, Option<SessionIdentity>, Self::Error> {
        let identity = self
            .tokens
            .get(credential)
            .map(|user_id| SessionIdentity { user_id: *user_id });
        if identity.is_none() {
            debug!("Session credential did not resolve to a user");
        }
        Box::pin(async move { Ok(identity) })
    }
}
