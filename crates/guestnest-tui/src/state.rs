//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── history: History           (browser-style entries + intents)
//! │   ├── session: Session           (latest snapshot from the store)
//! │   ├── chrome / coalescer         (navbar mode, once-per-frame sampling)
//! │   ├── pages: PageState           (scroll offset per route)
//! │   ├── navbar: NavbarState        (notice line)
//! │   ├── task_seq / tasks           (spawned store calls)
//! │   └── viewport                   (last known terminal size)
//! └── overlay: Option<Overlay>       (auth form or account menu)
//! ```
//!
//! Split so overlay handlers can take `&mut Overlay` and `&TuiState` together.

use guestnest_core::{
    ChromeModeController, FrameCoalescer, History, Location, OverlayRouter, Route, Session,
};

use crate::common::{TaskSeq, Tasks};
use crate::features::navbar::NavbarState;
use crate::features::pages::PageState;
use crate::overlays::Overlay;

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// State for a session starting at `route`, as if the visitor typed it.
    pub fn new(route: Route, session: Session) -> Self {
        Self {
            tui: TuiState {
                history: History::new(Location::new(route)),
                session,
                ..TuiState::default()
            },
            overlay: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::Home, Session::Pending)
    }
}

#[derive(Debug, Default)]
pub struct TuiState {
    pub history: History,
    pub session: Session,
    pub chrome: ChromeModeController,
    pub coalescer: FrameCoalescer,
    pub pages: PageState,
    pub navbar: NavbarState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Terminal (width, height) from the last `Frame` event.
    pub viewport: (u16, u16),
    pub should_quit: bool,
}

impl TuiState {
    /// Route drawn by the primary view tree (the background under an overlay).
    pub fn page_route(&self) -> Route {
        OverlayRouter::layers(self.history.current()).page
    }
}
