//! Auth feature reducer: submissions, logout and their results.

use guestnest_core::{CloseReason, Route, Session};
use tracing::{debug, warn};

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::TaskOutcome;
use crate::navigation;
use crate::overlays::{AuthSubmission, OverlayExt};
use crate::state::AppState;

/// Starts the session lookup. Ignored while one is already in flight.
pub fn resolve_session(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.tasks.session.is_running() {
        return vec![];
    }
    let task = start(app, TaskKind::Session);
    vec![UiEffect::ResolveSession { task }]
}

pub fn submit(app: &mut AppState, submission: AuthSubmission) -> Vec<UiEffect> {
    let task = start(app, TaskKind::Auth);
    match submission {
        AuthSubmission::Login(credentials) => {
            debug!(identifier = credentials.identifier(), "submit login");
            vec![UiEffect::Login { task, credentials }]
        }
        AuthSubmission::Signup(request) => {
            debug!(username = request.username(), "submit signup");
            vec![UiEffect::Signup { task, request }]
        }
    }
}

pub fn logout(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tui.session.is_authenticated() || app.tui.tasks.logout.is_running() {
        return vec![];
    }
    app.tui.navbar.dismiss_notice();
    let task = start(app, TaskKind::Logout);
    vec![UiEffect::Logout { task }]
}

/// Applies the result of a store call whose task was still active.
pub fn handle_task_outcome(app: &mut AppState, outcome: TaskOutcome) {
    match outcome {
        TaskOutcome::SessionResolved => {}
        TaskOutcome::Auth(Ok(session)) => {
            navigation::set_session(app, session);
            navigation::close_auth(app, CloseReason::Authenticated);
        }
        TaskOutcome::Auth(Err(err)) => {
            if let Some(form) = app.overlay.auth_form_mut() {
                form.error = Some(err.message);
            } else {
                warn!(error = %err, "auth failed after its form closed");
            }
        }
        TaskOutcome::Logout(Ok(session)) => {
            // Leave before the gate sees the anonymous session.
            navigation::navigate(app, Route::Home);
            navigation::set_session(app, session);
        }
        TaskOutcome::Logout(Err(err)) => {
            app.tui
                .navbar
                .show_notice(format!("Could not log out: {}", err.message));
        }
    }
}

pub fn handle_session_changed(app: &mut AppState, session: Session) {
    debug!(?session, "session changed");
    navigation::set_session(app, session);
    // Signed in elsewhere (or by a request the form no longer tracks).
    if app.tui.session.is_authenticated() && app.overlay.auth_form().is_some() {
        navigation::close_auth(app, CloseReason::Authenticated);
    }
}

/// Allocates an id and marks the task active before its effect runs.
fn start(app: &mut AppState, kind: TaskKind) -> TaskId {
    let id = app.tui.task_seq.next_id();
    app.tui.tasks.state_mut(kind).on_started(TaskStarted { id });
    id
}
