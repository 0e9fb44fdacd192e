//! Login / signup form.
//!
//! The same state backs both presentations: a popup over the background page,
//! or the page itself when the auth route was opened directly. Submitting only
//! produces a request once every required field is filled in.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use enum_map::{Enum, EnumMap};
use guestnest_core::{AuthRoute, Credentials, SignupRequest, ValidationError};

use super::OverlayTransition;
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Field {
    Identifier,
    FullName,
    Username,
    Email,
    Password,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Identifier => "Username or email",
            Field::FullName => "Full name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }

    pub fn is_secret(self) -> bool {
        self == Field::Password
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Identifier, Field::Password];
const SIGNUP_FIELDS: &[Field] = &[Field::FullName, Field::Username, Field::Email, Field::Password];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Drawn above the background page.
    Overlay,
    /// The auth route was the entry point; the form is the page.
    Page,
}

/// A validated request ready to hand to the session store.
#[derive(Debug)]
pub enum AuthSubmission {
    Login(Credentials),
    Signup(SignupRequest),
}

#[derive(Debug, Clone)]
pub struct AuthFormState {
    mode: AuthRoute,
    presentation: Presentation,
    values: EnumMap<Field, String>,
    focus: usize,
    /// Inline error from validation or the last failed submit.
    pub error: Option<String>,
}

impl AuthFormState {
    pub fn new(mode: AuthRoute, presentation: Presentation) -> Self {
        Self {
            mode,
            presentation,
            values: EnumMap::default(),
            focus: 0,
            error: None,
        }
    }

    pub fn mode(&self) -> AuthRoute {
        self.mode
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Follows the history entry. Typed values survive a login/signup switch.
    pub fn sync(&mut self, mode: AuthRoute, presentation: Presentation) {
        if self.mode != mode {
            self.mode = mode;
            self.focus = 0;
            self.error = None;
        }
        self.presentation = presentation;
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthRoute::Login => LOGIN_FIELDS,
            AuthRoute::Signup => SIGNUP_FIELDS,
        }
    }

    pub fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field]
    }

    /// Validates the visible fields and builds the request.
    ///
    /// # Errors
    /// Returns the first missing required field.
    pub fn submission(&self) -> Result<AuthSubmission, ValidationError> {
        let v = &self.values;
        match self.mode {
            AuthRoute::Login => Credentials::new(
                v[Field::Identifier].as_str(),
                v[Field::Password].as_str(),
            )
            .map(AuthSubmission::Login),
            AuthRoute::Signup => SignupRequest::new(
                v[Field::Username].as_str(),
                v[Field::Email].as_str(),
                v[Field::Password].as_str(),
                v[Field::FullName].as_str(),
            )
            .map(AuthSubmission::Signup),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayTransition {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayTransition::Close,
            KeyCode::Char('s') if ctrl => OverlayTransition::Auth(self.mode.other()),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields().len();
                OverlayTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.fields().len();
                self.focus = (self.focus + len - 1) % len;
                OverlayTransition::Stay
            }
            KeyCode::Enter => {
                if tui.tasks.auth.is_running() {
                    return OverlayTransition::Stay;
                }
                match self.submission() {
                    Ok(submission) => {
                        self.error = None;
                        OverlayTransition::Submit(submission)
                    }
                    Err(err) => {
                        self.error = Some(err.to_string());
                        OverlayTransition::Stay
                    }
                }
            }
            KeyCode::Backspace => {
                let field = self.focused();
                self.values[field].pop();
                self.error = None;
                OverlayTransition::Stay
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let field = self.focused();
                self.values[field].push(c);
                self.error = None;
                OverlayTransition::Stay
            }
            _ => OverlayTransition::Stay,
        }
    }
}
