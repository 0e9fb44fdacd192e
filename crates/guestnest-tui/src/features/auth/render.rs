//! Auth form view, as a popup or as a full page.

use guestnest_core::AuthRoute;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{mask, truncate_start_with_ellipsis};
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, inner_area, render_hints, render_overlay_container,
    render_separator,
};
use crate::overlays::{AuthFormState, Field, Presentation};

const ACCENT: Color = Color::Red;
const FORM_WIDTH: u16 = 56;

pub fn render_auth_form(frame: &mut Frame, area: Rect, form: &AuthFormState, submitting: bool) {
    let fields = form.fields();
    // Two rows per field, error, separator, submit, switch line, hints, borders.
    let height = fields.len() as u16 * 2 + 8;
    let popup = match form.presentation() {
        Presentation::Overlay => calculate_overlay_area(area, FORM_WIDTH, height),
        Presentation::Page => {
            let width = FORM_WIDTH.min(area.width);
            Rect::new(
                area.x + (area.width - width) / 2,
                area.y + 1u16.min(area.height),
                width,
                height.min(area.height.saturating_sub(1)),
            )
        }
    };
    let title = match form.mode() {
        AuthRoute::Login => "Log in",
        AuthRoute::Signup => "Sign up",
    };
    render_overlay_container(frame, popup, title, ACCENT);

    let inner = inner_area(popup, 1);
    let hints = [
        InputHint::new("Tab", "next"),
        InputHint::new("Enter", "submit"),
        InputHint::new("Ctrl+S", "switch"),
        InputHint::new("Esc", "close"),
    ];
    render_hints(frame, inner, &hints, ACCENT);

    let mut lines = Vec::with_capacity(fields.len() * 2 + 4);
    for &field in fields {
        lines.push(field_label(field, field == form.focused()));
        lines.push(field_value(form, field, inner.width as usize));
    }
    lines.push(match &form.error {
        Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
        None => Line::default(),
    });
    frame.render_widget(Paragraph::new(lines), inner);

    let separator_row = fields.len() as u16 * 2 + 1;
    render_separator(frame, inner, separator_row);

    let footer_y = inner.y + separator_row + 1;
    if footer_y + 3 <= inner.y + inner.height {
        let footer = Rect::new(inner.x, footer_y, inner.width, 2);
        frame.render_widget(
            Paragraph::new(vec![
                submit_line(form.mode(), submitting),
                switch_line(form.mode()),
            ]),
            footer,
        );
    }
}

fn field_label(field: Field, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(field.label(), style))
}

fn field_value(form: &AuthFormState, field: Field, width: usize) -> Line<'static> {
    let raw = form.value(field);
    let shown = if field.is_secret() {
        mask(raw)
    } else {
        raw.to_string()
    };
    let focused = field == form.focused();
    let shown = truncate_start_with_ellipsis(&shown, width.saturating_sub(3));

    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::raw(shown),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(ACCENT)));
    }
    Line::from(spans)
}

fn submit_line(mode: AuthRoute, submitting: bool) -> Line<'static> {
    if submitting {
        return Line::from(Span::styled(
            "Please wait...",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let label = match mode {
        AuthRoute::Login => "[ Log in ]",
        AuthRoute::Signup => "[ Sign up ]",
    };
    Line::from(Span::styled(
        label,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn switch_line(mode: AuthRoute) -> Line<'static> {
    let text = match mode {
        AuthRoute::Login => "Don't have an account? Ctrl+S to sign up",
        AuthRoute::Signup => "Already have an account? Ctrl+S to log in",
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
