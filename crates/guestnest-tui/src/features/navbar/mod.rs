//! Navbar feature.

mod render;
mod state;

pub use render::{height, render_navbar, render_notice};
pub use state::NavbarState;
