//! Navbar view: full or compact chrome, plus the notice line.

use guestnest_core::{ChromeMode, Route, Session};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

const BRAND: Color = Color::Red;

/// Rows taken by the navbar in each mode (bottom border included).
pub fn height(mode: ChromeMode) -> u16 {
    match mode {
        ChromeMode::Full => 4,
        ChromeMode::Compact => 2,
    }
}

pub fn render_navbar(frame: &mut Frame, area: Rect, tui: &TuiState, page: &Route) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let first_row = Rect::new(inner.x, inner.y, inner.width, 1);
    let logo = Line::from(vec![
        Span::styled("⌂ ", Style::default().fg(BRAND)),
        Span::styled(
            "guestnest",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ),
    ]);

    match tui.chrome.mode() {
        ChromeMode::Full => {
            frame.render_widget(Paragraph::new(logo), first_row);
            render_account(frame, first_row, &tui.session);

            if inner.height > 1 {
                let categories_row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
                frame.render_widget(
                    Paragraph::new(categories(page)).alignment(Alignment::Center),
                    categories_row,
                );
            }
            if inner.height > 2 {
                let search_row = Rect::new(inner.x, inner.y + 2, inner.width, 1);
                let search = search_bar(inner.width.saturating_sub(4) as usize);
                frame.render_widget(
                    Paragraph::new(search).alignment(Alignment::Center),
                    search_row,
                );
            }
        }
        ChromeMode::Compact => {
            let mut spans = logo.spans;
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                "( Anywhere · Any week · Add guests )",
                Style::default().fg(Color::Gray),
            ));
            frame.render_widget(Paragraph::new(Line::from(spans)), first_row);
            render_account(frame, first_row, &tui.session);
        }
    }
}

fn render_account(frame: &mut Frame, row: Rect, session: &Session) {
    let badge = match session {
        Session::Pending => Span::styled("…", Style::default().fg(Color::DarkGray)),
        Session::Resolved(Some(user)) => {
            let initial = user.initial().unwrap_or('?');
            Span::styled(
                format!("({initial})"),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )
        }
        Session::Resolved(None) => Span::styled("☰", Style::default().fg(Color::Gray)),
    };
    let line = Line::from(vec![
        Span::styled("List your home  ", Style::default().fg(Color::Gray)),
        badge,
        Span::styled(" u", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), row);
}

fn categories(page: &Route) -> Line<'static> {
    let entries = [
        ("Homes", Route::Homes, "m"),
        ("Experiences", Route::Experiences, "x"),
        ("Services", Route::Services, "v"),
    ];
    let mut spans = Vec::new();
    for (i, (label, route, key)) in entries.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        let style = if *page == route {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn search_bar(max_width: usize) -> Line<'static> {
    let text = "│ Where: Search destinations │ Check in │ Check out │ Who: Add guests │ ⌕ │";
    Line::from(Span::styled(
        truncate_with_ellipsis(text, max_width),
        Style::default().fg(Color::Gray),
    ))
}

/// One-line notice below the navbar.
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &str) {
    let line = Line::from(vec![
        Span::styled("! ", Style::default().fg(Color::Red)),
        Span::styled(
            truncate_with_ellipsis(notice, area.width.saturating_sub(2) as usize),
            Style::default().fg(Color::Red),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
