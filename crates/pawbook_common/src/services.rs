// --- File: crates/pawbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for external services used by the application.
//! These traits allow for dependency injection and easier testing by decoupling the
//! application logic from specific implementations of external services.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// The identity carried by an authentication session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionIdentity {
    /// The user id the session belongs to.
    pub user_id: i64,
}

/// A trait for authentication session lookup.
///
/// The authentication service is an external collaborator: it issues session
/// credentials and resolves them to user identities. This trait is the seam
/// the application uses to consume it, so tests can substitute a double and
/// deployments can swap implementations.
pub trait SessionProvider: Send + Sync {
    /// Error type returned by session lookup operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a session credential to the identity it carries.
    ///
    /// Returns `None` when the credential is unknown or expired. An absent
    /// credential is not an error; it renders the caller anonymous.
    fn resolve_session(
        &self,
        credential: &str,
    ) -> BoxFuture<'_, Option<SessionIdentity>, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of external services.
/// It's used by the application to get access to the services it needs.
pub trait ServiceFactory: Send + Sync {
    /// Get a session provider instance.
    fn session_provider(&self) -> Option<Arc<dyn SessionProvider<Error = BoxedError>>>;
}
