//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and returns effects;
//! this module spawns the matching store calls and feeds their results back
//! through the inbox.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use guestnest_core::{IdentityService, Route, SessionStore};
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::{TaskOutcome, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame duration (~60fps). Scroll sampling happens at most once per
/// frame.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when nothing is in flight.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime<S: IdentityService> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    store: SessionStore<S>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl<S: IdentityService> TuiRuntime<S> {
    /// Enters the alternate screen and builds the initial state at `route`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(store: SessionStore<S>, route: Route) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(route, store.session());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the user quits, then restores the terminal.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        tokio::spawn(handlers::forward_session_changes(
            self.store.subscribe(),
            self.inbox_tx.clone(),
        ));
        let effects = update::start(&mut self.state);
        self.execute_effects(effects);

        let result = self.event_loop();
        let restored = terminal::restore_terminal();
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick renders; other events batch into the next frame.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        info!("interactive session ended");
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.coalescer.is_scheduled()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let store = self.store.clone();
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::ResolveSession { task } => {
                self.spawn_task(TaskKind::Session, task, handlers::resolve_session(store));
            }
            UiEffect::Login { task, credentials } => {
                self.spawn_task(TaskKind::Auth, task, handlers::login(store, credentials));
            }
            UiEffect::Signup { task, request } => {
                self.spawn_task(TaskKind::Auth, task, handlers::signup(store, request));
            }
            UiEffect::Logout { task } => {
                self.spawn_task(TaskKind::Logout, task, handlers::logout(store));
            }
        }
    }

    /// Spawns a store call and sends its outcome to the inbox tagged with
    /// the task id.
    fn spawn_task<F>(&self, kind: TaskKind, id: TaskId, fut: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        debug!(?kind, id = id.0, "spawn task");
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = fut.await;
            let completed = TaskCompleted { id, result };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }
}
