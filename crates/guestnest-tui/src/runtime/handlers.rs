//! Effect handlers.
//!
//! Pure async functions over the session store. They return a `TaskOutcome`
//! and never touch UI state; the runtime spawns them and forwards results
//! through the inbox.

use guestnest_core::{Credentials, IdentityService, Session, SessionStore, SignupRequest};
use tokio::sync::watch;
use tracing::debug;

use super::inbox::UiEventSender;
use crate::events::{TaskOutcome, UiEvent};

pub async fn resolve_session<S: IdentityService>(store: SessionStore<S>) -> TaskOutcome {
    store.refresh().await;
    TaskOutcome::SessionResolved
}

pub async fn login<S: IdentityService>(
    store: SessionStore<S>,
    credentials: Credentials,
) -> TaskOutcome {
    TaskOutcome::Auth(store.login(credentials).await.map(|()| store.session()))
}

pub async fn signup<S: IdentityService>(
    store: SessionStore<S>,
    request: SignupRequest,
) -> TaskOutcome {
    TaskOutcome::Auth(store.signup(request).await.map(|()| store.session()))
}

pub async fn logout<S: IdentityService>(store: SessionStore<S>) -> TaskOutcome {
    TaskOutcome::Logout(store.logout().await.map(|()| store.session()))
}

/// Forwards every published session to the inbox until the UI goes away.
///
/// Subscribe before spawning any store call, or the first change is missed.
pub async fn forward_session_changes(mut rx: watch::Receiver<Session>, tx: UiEventSender) {
    while rx.changed().await.is_ok() {
        let session = rx.borrow_and_update().clone();
        if tx.send(UiEvent::SessionChanged(session)).is_err() {
            debug!("inbox closed, stopping session watcher");
            break;
        }
    }
}
