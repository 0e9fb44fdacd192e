//! UI events consumed by the reducer.

use crossterm::event::Event;
use guestnest_core::{AuthError, Session};

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence tick. The only event that marks the screen dirty.
    Tick,
    /// Current terminal size, sent before every batch of events.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    /// New value published by the session store.
    SessionChanged(Session),
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<TaskOutcome>,
    },
}

/// Result of a spawned store call.
///
/// Successful auth actions carry the session snapshot taken right after the
/// store settled, so the reducer never closes the form against a stale session.
#[derive(Debug)]
pub enum TaskOutcome {
    SessionResolved,
    Auth(Result<Session, AuthError>),
    Logout(Result<Session, AuthError>),
}
