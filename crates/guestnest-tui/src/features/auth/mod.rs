//! Auth feature: the login/signup form view and the session reducer.

mod render;
mod update;

pub use render::render_auth_form;
pub use update::{handle_session_changed, handle_task_outcome, logout, resolve_session, submit};
