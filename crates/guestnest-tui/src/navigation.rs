//! History moves made by the reducer.
//!
//! Every move ends in [`after_navigation`], which applies the auth gate to the
//! page route and makes the auth form overlay follow the current entry.

use guestnest_core::{
    AuthGate, AuthRoute, CloseReason, GateDecision, Location, OverlayRouter, Route, Session,
};
use tracing::{debug, info};

use crate::overlays::{AuthFormState, Overlay, OverlayExt, Presentation};
use crate::state::{AppState, TuiState};

/// Pushes a plain route.
pub fn navigate(app: &mut AppState, route: Route) {
    if app.tui.history.current().route == route {
        return;
    }
    debug!(route = %route, "navigate");
    app.tui.history.push(Location::new(route));
    after_navigation(app);
}

pub fn back(app: &mut AppState) {
    if app.tui.history.back() {
        after_navigation(app);
    }
}

pub fn forward(app: &mut AppState) {
    if app.tui.history.forward() {
        after_navigation(app);
    }
}

/// Opens an auth form above the current page.
pub fn open_auth(app: &mut AppState, target: AuthRoute) {
    OverlayRouter::open(&mut app.tui.history, target);
    after_navigation(app);
}

/// Switches login ↔ signup in place.
///
/// The overlay stays the same one, so a request still in flight keeps its
/// task and reports back to the switched form.
pub fn switch_auth(app: &mut AppState, target: AuthRoute) {
    OverlayRouter::switch(&mut app.tui.history, target);
    after_navigation(app);
}

pub fn close_auth(app: &mut AppState, reason: CloseReason) {
    OverlayRouter::close(&mut app.tui.history, reason);
    after_navigation(app);
}

/// Stores a new session snapshot and re-evaluates the gate.
pub fn set_session(app: &mut AppState, session: Session) {
    if app.tui.session == session {
        return;
    }
    app.tui.session = session;
    after_navigation(app);
}

pub fn after_navigation(app: &mut AppState) {
    if app.overlay.is_menu_open() {
        app.overlay = None;
    }
    apply_gate(&mut app.tui);
    sync_auth_form(app);

    // Each page keeps its own offset; sample it so the chrome matches.
    let page = app.tui.page_route();
    let y = app.tui.pages.offset_px(&page);
    app.tui.coalescer.record(y);
}

/// Replaces an owner-only entry with the login form for anonymous visitors.
fn apply_gate(tui: &mut TuiState) {
    let route = tui.history.current().route.clone();
    if route.is_auth() {
        return;
    }
    if let GateDecision::Redirect(intent) = AuthGate::check(&tui.session, &route) {
        info!(route = %route, "login required");
        OverlayRouter::redirect(&mut tui.history, intent);
    }
}

fn sync_auth_form(app: &mut AppState) {
    let location = app.tui.history.current();
    match OverlayRouter::auth_form(location) {
        Some(mode) => {
            let presentation = if location.background().is_some() {
                Presentation::Overlay
            } else {
                Presentation::Page
            };
            if let Some(form) = app.overlay.auth_form_mut() {
                form.sync(mode, presentation);
            } else {
                app.overlay = Some(Overlay::Auth(AuthFormState::new(mode, presentation)));
            }
        }
        None => {
            if app.overlay.auth_form().is_some() {
                app.overlay = None;
                app.tui.tasks.auth.clear();
            }
        }
    }
}
