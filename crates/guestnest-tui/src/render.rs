//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{auth, navbar, pages};
use crate::overlays::{Overlay, Presentation};
use crate::state::{AppState, TuiState};

const FOOTER_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let state = &app.tui;
    let notice_height = u16::from(state.navbar.notice.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(navbar::height(state.chrome.mode())),
            Constraint::Length(notice_height),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let page = state.page_route();
    navbar::render_navbar(frame, chunks[0], state, &page);
    if let Some(notice) = &state.navbar.notice {
        navbar::render_notice(frame, chunks[1], notice);
    }

    let body = chunks[2];
    let submitting = state.tasks.auth.is_running();
    match &app.overlay {
        Some(Overlay::Auth(form)) if form.presentation() == Presentation::Page => {
            auth::render_auth_form(frame, body, form, submitting);
        }
        _ => pages::render_page(frame, body, &page, &state.session, &state.pages),
    }

    render_footer(frame, chunks[3], state);

    match &app.overlay {
        Some(Overlay::Auth(form)) if form.presentation() == Presentation::Overlay => {
            auth::render_auth_form(frame, body, form, submitting);
        }
        Some(Overlay::AccountMenu(menu)) => menu.render(frame, body, state),
        _ => {}
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &TuiState) {
    let path = state.history.current().route.path();
    let hints = "h home · m homes · x experiences · v services · n host · l log in · s sign up · u account · q quit";
    let line = Line::from(vec![
        Span::styled(format!("{path}  "), Style::default().fg(Color::Gray)),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
