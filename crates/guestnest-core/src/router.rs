//! Modal-as-route navigation for the login/signup forms.
//!
//! Opening an auth form pushes an auth entry whose intent remembers the page
//! underneath. The view tree keeps rendering that background page, and the
//! form draws as a layer on top, so the page is never torn down while the
//! form is open. Closing restores the background entry.

use tracing::{debug, warn};

use crate::navigation::{AuthRoute, History, Location, NavigationIntent, Route};

/// Why the auth form is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Close button or Escape.
    Dismissed,
    /// Login or signup succeeded.
    Authenticated,
}

/// What to render for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers {
    /// Route for the primary view tree.
    pub page: Route,
    /// Auth form drawn above `page`, when arriving from another page.
    pub overlay: Option<AuthRoute>,
}

/// Stateless operations over a [`History`].
pub struct OverlayRouter;

impl OverlayRouter {
    /// Opens an auth form above the current page.
    pub fn open(history: &mut History, target: AuthRoute) {
        let current = history.current();
        let background = if current.route.is_auth() {
            current.background().cloned()
        } else {
            Some(current.route.clone())
        };
        debug!(target = ?target, background = ?background, "open auth form");
        match NavigationIntent::new(target, background) {
            Ok(intent) => history.push(Location::auth(intent)),
            Err(err) => warn!(error = %err, "refusing to open auth form"),
        }
    }

    /// Applies a gate redirect in place of the intercepted entry.
    pub fn redirect(history: &mut History, intent: NavigationIntent) {
        debug!(background = ?intent.background(), "auth gate redirect");
        history.replace(Location::auth(intent));
    }

    /// Switches between login and signup, keeping the original background.
    ///
    /// Replaces the current entry so closing still lands on the background.
    pub fn switch(history: &mut History, target: AuthRoute) {
        let current = history.current();
        let intent = match &current.intent {
            Some(intent) => intent.retarget(target),
            None => match NavigationIntent::new(target, None) {
                Ok(intent) => intent,
                Err(err) => {
                    warn!(error = %err, "refusing to switch auth form");
                    return;
                }
            },
        };
        history.replace(Location::auth(intent));
    }

    /// Closes the auth form.
    ///
    /// Without a background the form was a standalone page, so the visitor is
    /// sent home in place of the auth entry.
    pub fn close(history: &mut History, reason: CloseReason) {
        let Some(background) = history.current().background().cloned() else {
            history.replace(Location::new(Route::Home));
            return;
        };

        let previous_is_background = history
            .previous()
            .is_some_and(|prev| prev.route == background);

        if previous_is_background {
            history.back();
        } else if reason == CloseReason::Authenticated {
            // Gate redirects replace the protected entry; restore it in place.
            history.replace(Location::new(background));
        } else if !history.back() {
            history.replace(Location::new(Route::Home));
        }
    }

    /// Splits a location into the page route and the optional auth layer.
    pub fn layers(location: &Location) -> Layers {
        match location.background() {
            Some(background) => Layers {
                page: background.clone(),
                overlay: location.route.as_auth(),
            },
            None => Layers {
                page: location.route.clone(),
                overlay: None,
            },
        }
    }

    /// Auth form shown for a location, either as overlay or as the page.
    pub fn auth_form(location: &Location) -> Option<AuthRoute> {
        location.route.as_auth()
    }
}
