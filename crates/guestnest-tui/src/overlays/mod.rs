//! Overlay modules for the TUI.
//!
//! Overlays are modal components that take over keyboard input. Each one owns
//! its state and key handler; key handlers never touch history or spawn work,
//! they return an [`OverlayTransition`] that the reducer applies.
//!
//! - `auth_form.rs`: login / signup form
//! - `account_menu.rs`: account dropdown
//! - `render_utils.rs`: shared popup rendering

pub mod account_menu;
pub mod auth_form;
pub mod render_utils;

pub use account_menu::{AccountMenuState, MenuItem, menu_items};
pub use auth_form::{AuthFormState, AuthSubmission, Field, Presentation};
use crossterm::event::KeyEvent;
use guestnest_core::AuthRoute;

use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    /// Close the overlay. For the auth form this is a dismissal.
    Close,
    /// Show the given auth form, opening it or switching to it.
    Auth(AuthRoute),
    /// Validated auth form submission.
    Submit(AuthSubmission),
    /// Close and log out.
    Logout,
}

#[derive(Debug)]
pub enum Overlay {
    Auth(AuthFormState),
    AccountMenu(AccountMenuState),
}

impl Overlay {
    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayTransition {
        match self {
            Overlay::Auth(form) => form.handle_key(tui, key),
            Overlay::AccountMenu(menu) => menu.handle_key(tui, key),
        }
    }

    pub fn as_auth_form(&self) -> Option<&AuthFormState> {
        match self {
            Overlay::Auth(form) => Some(form),
            Overlay::AccountMenu(_) => None,
        }
    }

    pub fn as_auth_form_mut(&mut self) -> Option<&mut AuthFormState> {
        match self {
            Overlay::Auth(form) => Some(form),
            Overlay::AccountMenu(_) => None,
        }
    }
}

/// Convenience accessors on `Option<Overlay>`.
pub trait OverlayExt {
    fn auth_form(&self) -> Option<&AuthFormState>;
    fn auth_form_mut(&mut self) -> Option<&mut AuthFormState>;
    fn is_menu_open(&self) -> bool;
}

impl OverlayExt for Option<Overlay> {
    fn auth_form(&self) -> Option<&AuthFormState> {
        self.as_ref().and_then(Overlay::as_auth_form)
    }

    fn auth_form_mut(&mut self) -> Option<&mut AuthFormState> {
        self.as_mut().and_then(Overlay::as_auth_form_mut)
    }

    fn is_menu_open(&self) -> bool {
        matches!(self, Some(Overlay::AccountMenu(_)))
    }
}
