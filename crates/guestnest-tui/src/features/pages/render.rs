//! Page bodies.
//!
//! Listing data and the owner forms live behind their own services; these
//! views only show enough content to browse, scroll and exercise the gate.

use guestnest_core::{AuthGate, Route, Session, UserIdentity};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::PageState;

/// A browseable stay shown on the home and category pages.
pub struct Stay {
    pub id: &'static str,
    pub title: &'static str,
    pub place: &'static str,
    pub price: u32,
}

pub const FEATURED: &[Stay] = &[
    Stay {
        id: "1",
        title: "Cliffside cottage with sea views",
        place: "Sintra, Portugal",
        price: 4200,
    },
    Stay {
        id: "2",
        title: "Bright loft near the old port",
        place: "Marseille, France",
        price: 3600,
    },
    Stay {
        id: "3",
        title: "Treehouse in the cedar forest",
        place: "Manali, India",
        price: 2800,
    },
    Stay {
        id: "4",
        title: "Canal house with rooftop deck",
        place: "Amsterdam, Netherlands",
        price: 6100,
    },
    Stay {
        id: "5",
        title: "Adobe casita under desert skies",
        place: "Santa Fe, United States",
        price: 5300,
    },
    Stay {
        id: "6",
        title: "Lakefront cabin with sauna",
        place: "Kuopio, Finland",
        price: 4700,
    },
    Stay {
        id: "7",
        title: "Backwater houseboat",
        place: "Alappuzha, India",
        price: 3900,
    },
    Stay {
        id: "8",
        title: "Stone farmhouse among olive groves",
        place: "Puglia, Italy",
        price: 5100,
    },
    Stay {
        id: "9",
        title: "Minimalist studio by the river",
        place: "Kyoto, Japan",
        price: 4400,
    },
];

const EXPERIENCES: &[&str] = &[
    "Sunrise kayak tour along the coast",
    "Street food walk through the night market",
    "Pottery class with a local ceramicist",
    "Guided trek to the hidden waterfall",
    "Cooking lesson in a family kitchen",
    "Stargazing evening in the dunes",
];

const SERVICES: &[&str] = &[
    "Private chef for your stay",
    "In-home massage",
    "Airport pickup and drop-off",
    "Photographer for a golden-hour shoot",
    "Daily housekeeping",
];

/// Rows each stay card occupies.
const CARD_ROWS: usize = 4;

/// Looks up a featured stay by its 1-based position on the listing pages.
pub fn stay_at(position: usize) -> Option<&'static Stay> {
    position.checked_sub(1).and_then(|i| FEATURED.get(i))
}

pub fn find_stay(id: &str) -> Option<&'static Stay> {
    FEATURED.iter().find(|stay| stay.id == id)
}

/// Routes whose digit keys open a listing.
pub fn lists_stays(route: &Route) -> bool {
    matches!(route, Route::Home | Route::Homes)
}

/// Total content rows for a route. Used to clamp scrolling.
pub fn content_rows(route: &Route) -> usize {
    page_lines(route, None).len()
}

pub fn page_lines(route: &Route, user: Option<&UserIdentity>) -> Vec<Line<'static>> {
    match route {
        Route::Home => {
            let mut lines = heading("Find your next stay", "Homes, experiences and services");
            lines.extend(stay_cards());
            lines
        }
        Route::Homes => {
            let mut lines = heading("All homes", "Press a number to open a listing");
            lines.extend(stay_cards());
            lines
        }
        Route::Experiences => {
            let mut lines = heading("Experiences", "Hosted by locals");
            lines.extend(bullets(EXPERIENCES));
            lines
        }
        Route::Services => {
            let mut lines = heading("Services", "Add something extra to your stay");
            lines.extend(bullets(SERVICES));
            lines
        }
        Route::Listing { id } => listing_lines(id),
        Route::CreateListing => {
            let host = user.map_or("host", UserIdentity::label);
            let mut lines = heading("List your property", "Owner tools");
            lines.push(Line::from(format!("Signed in as {host}.")));
            lines.push(Line::from("Title, description, price and photos go here."));
            lines
        }
        Route::EditListing { id } => {
            let title = find_stay(id).map_or("Unknown listing", |stay| stay.title);
            let mut lines = heading(&format!("Edit listing {id}"), title);
            lines.push(Line::from("Update the details and save to publish changes."));
            lines
        }
        // Auth routes render the form itself; see `features::auth`.
        Route::Login | Route::Signup => Vec::new(),
        Route::NotFound(path) => {
            let mut lines = heading("Page not found", path);
            lines.push(Line::from("Press h to go home."));
            lines
        }
    }
}

fn heading(title: &str, subtitle: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ]
}

fn stay_cards() -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(FEATURED.len() * CARD_ROWS);
    for (i, stay) in FEATURED.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Red)),
            Span::styled(stay.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            stay.place,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(format!("₹{} / night", stay.price)));
        lines.push(Line::default());
    }
    lines
}

fn bullets(items: &[&'static str]) -> Vec<Line<'static>> {
    items
        .iter()
        .flat_map(|item| [Line::from(format!("• {item}")), Line::default()])
        .collect()
}

fn listing_lines(id: &str) -> Vec<Line<'static>> {
    let Some(stay) = find_stay(id) else {
        return heading("Listing not found", &format!("/listings/{id}"));
    };
    let mut lines = heading(stay.title, stay.place);
    lines.push(Line::from(format!("₹{} / night", stay.price)));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press e to edit this listing",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Lines for `route` as the gate allows them: the page itself, a short
/// notice while the session is pending, or nothing for a redirect.
fn gated_lines(route: &Route, session: &Session) -> Vec<Line<'static>> {
    match AuthGate::guard(session, route, route) {
        Some(route) => page_lines(route, session.user()),
        None if session.is_pending() => vec![Line::from(Span::styled(
            "Checking session...",
            Style::default().fg(Color::DarkGray),
        ))],
        None => Vec::new(),
    }
}

/// Draws the page for `route`, scrolled to its saved offset.
pub fn render_page(
    frame: &mut Frame,
    area: Rect,
    route: &Route,
    session: &Session,
    pages: &PageState,
) {
    let offset = pages.offset(route);
    let para = Paragraph::new(gated_lines(route, session)).scroll((offset, 0));
    frame.render_widget(para, area);
}
