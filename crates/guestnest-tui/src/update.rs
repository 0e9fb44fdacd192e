//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use guestnest_core::{AuthRoute, CloseReason, Route};
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{auth, navbar, pages};
use crate::navigation;
use crate::overlays::{AccountMenuState, Overlay, OverlayTransition};
use crate::state::{AppState, TuiState};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Effects to run once at startup: settle the first entry and resolve the
/// session.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    navigation::after_navigation(app);
    auth::resolve_session(app)
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if let Some(true) = app.tui.coalescer.flush(&mut app.tui.chrome) {
                debug!(mode = ?app.tui.chrome.mode(), "chrome mode changed");
            }
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionChanged(session) => {
            auth::handle_session_changed(app, session);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                auth::handle_task_outcome(app, completed.result);
            } else {
                debug!(?kind, id = completed.id.0, "dropping result of inactive task");
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) if app.overlay.is_none() => {
            match mouse.kind {
                MouseEventKind::ScrollDown => scroll(&mut app.tui, WHEEL_ROWS),
                MouseEventKind::ScrollUp => scroll(&mut app.tui, -WHEEL_ROWS),
                _ => {}
            }
            vec![]
        }
        Event::Resize(width, height) => {
            app.tui.viewport = (width, height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let transition = overlay.handle_key(&app.tui, key);
        return apply_overlay_transition(app, transition);
    }

    let tui = &mut app.tui;
    match key.code {
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('h') => navigation::navigate(app, Route::Home),
        KeyCode::Char('m') => navigation::navigate(app, Route::Homes),
        KeyCode::Char('x') => navigation::navigate(app, Route::Experiences),
        KeyCode::Char('v') => navigation::navigate(app, Route::Services),
        KeyCode::Char('n') => navigation::navigate(app, Route::CreateListing),
        KeyCode::Char('e') => {
            if let Route::Listing { id } = &tui.history.current().route {
                let route = Route::EditListing { id: id.clone() };
                navigation::navigate(app, route);
            }
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let page = tui.page_route();
            let position = digit as usize - '0' as usize;
            if pages::lists_stays(&page)
                && let Some(stay) = pages::stay_at(position)
            {
                navigation::navigate(
                    app,
                    Route::Listing {
                        id: stay.id.to_string(),
                    },
                );
            }
        }
        KeyCode::Char('l') => navigation::open_auth(app, AuthRoute::Login),
        KeyCode::Char('s') => navigation::open_auth(app, AuthRoute::Signup),
        KeyCode::Char('o') => return auth::logout(app),
        KeyCode::Char('r') => return auth::resolve_session(app),
        KeyCode::Char('u') => {
            app.overlay = Some(Overlay::AccountMenu(AccountMenuState::default()));
        }
        KeyCode::Backspace | KeyCode::Left => navigation::back(app),
        KeyCode::Right => navigation::forward(app),
        KeyCode::Down | KeyCode::Char('j') => scroll(tui, 1),
        KeyCode::Up | KeyCode::Char('k') => scroll(tui, -1),
        KeyCode::PageDown | KeyCode::Char(' ') => {
            let rows = body_rows(tui) as i32;
            scroll(tui, rows);
        }
        KeyCode::PageUp => {
            let rows = body_rows(tui) as i32;
            scroll(tui, -rows);
        }
        KeyCode::Home | KeyCode::Char('g') => scroll(tui, i32::MIN / 2),
        KeyCode::End | KeyCode::Char('G') => scroll(tui, i32::MAX / 2),
        KeyCode::Esc => tui.navbar.dismiss_notice(),
        _ => {}
    }
    vec![]
}

fn apply_overlay_transition(app: &mut AppState, transition: OverlayTransition) -> Vec<UiEffect> {
    let on_auth_form = matches!(app.overlay, Some(Overlay::Auth(_)));
    match transition {
        OverlayTransition::Stay => vec![],
        OverlayTransition::Close => {
            if on_auth_form {
                navigation::close_auth(app, CloseReason::Dismissed);
            } else {
                app.overlay = None;
            }
            vec![]
        }
        OverlayTransition::Auth(target) => {
            if on_auth_form {
                navigation::switch_auth(app, target);
            } else {
                app.overlay = None;
                navigation::open_auth(app, target);
            }
            vec![]
        }
        OverlayTransition::Submit(submission) => auth::submit(app, submission),
        OverlayTransition::Logout => {
            app.overlay = None;
            auth::logout(app)
        }
    }
}

/// Rows available to the page body below the navbar and above the footer.
fn body_rows(tui: &TuiState) -> u16 {
    let mut chrome = navbar::height(tui.chrome.mode()) + 1;
    if tui.navbar.notice.is_some() {
        chrome += 1;
    }
    tui.viewport.1.saturating_sub(chrome).max(1)
}

/// Scrolls the page under the cursor and hands the new offset to the
/// coalescer; the chrome is re-evaluated on the next tick.
fn scroll(tui: &mut TuiState, delta: i32) {
    let page = tui.page_route();
    let max = pages::content_rows(&page).saturating_sub(body_rows(tui) as usize);
    let before = tui.pages.offset(&page);
    let after = tui.pages.scroll_by(&page, delta, max.min(u16::MAX as usize) as u16);
    if after != before {
        tui.coalescer.record(tui.pages.offset_px(&page));
    }
}
