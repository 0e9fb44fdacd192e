//! Account dropdown under the navbar badge.

use crossterm::event::{KeyCode, KeyEvent};
use guestnest_core::{AuthRoute, Session};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayTransition;
use super::render_utils::render_overlay_container;
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Signup,
    Login,
    Logout,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Signup => "Sign up",
            MenuItem::Login => "Log in",
            MenuItem::Logout => "Log out",
        }
    }
}

/// Entries for the current session. Empty while it is still pending.
pub fn menu_items(session: &Session) -> &'static [MenuItem] {
    match session {
        Session::Pending => &[],
        Session::Resolved(Some(_)) => &[MenuItem::Logout],
        Session::Resolved(None) => &[MenuItem::Signup, MenuItem::Login],
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountMenuState {
    selected: usize,
}

impl AccountMenuState {
    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayTransition {
        let items = menu_items(&tui.session);
        match key.code {
            KeyCode::Esc | KeyCode::Char('u') => OverlayTransition::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                OverlayTransition::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < items.len() {
                    self.selected += 1;
                }
                OverlayTransition::Stay
            }
            KeyCode::Enter => match items.get(self.selected) {
                Some(MenuItem::Signup) => OverlayTransition::Auth(AuthRoute::Signup),
                Some(MenuItem::Login) => OverlayTransition::Auth(AuthRoute::Login),
                Some(MenuItem::Logout) => OverlayTransition::Logout,
                None => OverlayTransition::Stay,
            },
            _ => OverlayTransition::Stay,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let items = menu_items(&tui.session);
        let width = 24.min(area.width);
        let rows = items.len().max(1) as u16;
        let height = (rows + 2).min(area.height);
        let popup = Rect::new(area.x + area.width - width, area.y, width, height);
        render_overlay_container(frame, popup, "Account", Color::Gray);

        let inner = Rect::new(
            popup.x + 2,
            popup.y + 1,
            popup.width.saturating_sub(4),
            popup.height.saturating_sub(2),
        );

        let lines: Vec<Line> = if items.is_empty() {
            vec![Line::from(Span::styled(
                "Checking session...",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if i == self.selected.min(items.len() - 1) {
                        Line::from(Span::styled(
                            format!("› {}", item.label()),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::from(format!("  {}", item.label()))
                    }
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
