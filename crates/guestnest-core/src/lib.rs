//! Session and navigation core for the GuestNest client.
//!
//! - `session`: the `SessionStore`, sole owner of "who is logged in"
//! - `gate`: `AuthGate`, projection of the session in front of owner-only views
//! - `navigation` / `router`: routes, history and the modal-as-route overlay
//! - `chrome`: navigation chrome display mode derived from scroll samples
//! - `identity`: the remote identity service seam and its HTTP client

pub mod chrome;
pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod navigation;
pub mod router;
pub mod session;

pub use chrome::{ChromeMode, ChromeModeController, FrameCoalescer};
pub use error::{AuthError, AuthErrorKind, IntentError, ValidationError};
pub use gate::{AuthGate, GateDecision};
pub use identity::{HttpIdentityClient, IdentityService, ServiceError, UserIdentity};
pub use navigation::{AuthRoute, History, Location, NavigationIntent, Route};
pub use router::{CloseReason, Layers, OverlayRouter};
pub use session::{Credentials, Session, SessionStore, SignupRequest};
