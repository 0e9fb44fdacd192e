//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never talks to the session store directly.

use guestnest_core::{Credentials, SignupRequest};

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Ask the backend who is signed in (startup and manual refresh).
    ResolveSession { task: TaskId },

    Login {
        task: TaskId,
        credentials: Credentials,
    },

    Signup {
        task: TaskId,
        request: SignupRequest,
    },

    Logout { task: TaskId },
}
