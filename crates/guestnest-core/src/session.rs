//! Authentication state and its single writer.
//!
//! ```text
//! Pending ──resolve──▶ Resolved(user)
//! Resolved(u1) ──login / signup / logout (then resolve)──▶ Resolved(u2)
//! ```
//!
//! No transition ever returns to `Pending`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::AuthError;
pub use crate::identity::{Credentials, SignupRequest};
use crate::identity::{IdentityService, UserIdentity};

/// Resolved-or-pending authentication status of the current visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// No resolution attempted yet. Not the same as anonymous.
    #[default]
    Pending,
    /// Resolution finished; `None` is an anonymous visitor.
    Resolved(Option<UserIdentity>),
}

impl Session {
    pub fn is_pending(&self) -> bool {
        matches!(self, Session::Pending)
    }

    /// The authenticated user, if resolved and logged in.
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Session::Resolved(Some(user)) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// True only once resolution has finished without a user.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Session::Resolved(None))
    }
}

/// Single source of truth for authentication state.
///
/// Cheap to clone; clones share the same session. The application root
/// creates one store and hands clones to whatever needs to read or mutate
/// the session. Readers take snapshots with [`SessionStore::session`] or
/// watch for changes through [`SessionStore::subscribe`].
pub struct SessionStore<S> {
    service: Arc<S>,
    state: Arc<watch::Sender<Session>>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: IdentityService> SessionStore<S> {
    /// Creates a store in the `Pending` state. Call [`resolve`](Self::resolve)
    /// once at startup.
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(Session::Pending);
        Self {
            service: Arc::new(service),
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Looks up the current identity and records the result.
    ///
    /// Never fails: any lookup failure degrades to an anonymous session.
    pub async fn resolve(&self) {
        let next = match self.service.me().await {
            Ok(user) => Session::Resolved(user),
            Err(err) => {
                warn!(error = %err, "session resolution degraded to anonymous");
                Session::Resolved(None)
            }
        };
        match next.user() {
            Some(user) => info!(user = %user.username, "session resolved"),
            None => info!("session resolved (anonymous)"),
        }
        self.state.send_replace(next);
    }

    /// Re-checks the session on demand. Same contract as `resolve`.
    pub async fn refresh(&self) {
        self.resolve().await;
    }

    /// Submits credentials, then re-resolves the session.
    ///
    /// # Errors
    /// Returns `AuthError` if the service rejects the credentials or the
    /// request fails; the session is left untouched in that case.
    pub async fn login(&self, credentials: Credentials) -> Result<(), AuthError> {
        self.service
            .login(&credentials)
            .await
            .map_err(|err| action_error("login", err))?;
        self.resolve().await;
        Ok(())
    }

    /// Creates an account, then re-resolves the session.
    ///
    /// # Errors
    /// Returns `AuthError` if the service rejects the signup or the request
    /// fails; the session is left untouched in that case.
    pub async fn signup(&self, request: SignupRequest) -> Result<(), AuthError> {
        self.service
            .signup(&request)
            .await
            .map_err(|err| action_error("signup", err))?;
        self.resolve().await;
        Ok(())
    }

    /// Invalidates the remote session.
    ///
    /// Local state is cleared only after the service confirms; on failure the
    /// previously authenticated user stays visible.
    ///
    /// # Errors
    /// Returns `AuthError` if the invalidate request fails.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.service
            .logout()
            .await
            .map_err(|err| action_error("logout", err))?;
        self.state.send_replace(Session::Resolved(None));
        self.resolve().await;
        Ok(())
    }
}

fn action_error(action: &'static str, err: crate::identity::ServiceError) -> AuthError {
    warn!(action, error = %err, "auth action failed");
    AuthError::from_service(err)
}
