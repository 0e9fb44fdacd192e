//! Full-screen terminal front end for GuestNest.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod navigation;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use guestnest_core::{IdentityService, Route, SessionStore};
pub use runtime::TuiRuntime;

/// Runs the interactive browser starting at `start_path`.
///
/// The session starts pending and is resolved in the background; protected
/// pages show a placeholder until it settles.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
pub fn run_interactive<S: IdentityService>(store: SessionStore<S>, start_path: &str) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive browser requires a terminal.\n\
             Use `guestnest whoami` for non-interactive use."
        );
    }

    let route = Route::parse(start_path);
    tracing::info!(route = %route, "starting interactive session");
    let mut runtime = TuiRuntime::new(store, route)?;
    runtime.run()
}
