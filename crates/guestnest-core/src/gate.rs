//! Gate in front of owner-only views.

use crate::navigation::{AuthRoute, NavigationIntent, Route};
use crate::session::Session;

/// Outcome of gating a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the requested view.
    Render,
    /// Session not resolved yet: render nothing, do not redirect.
    Suspend,
    /// Anonymous visitor: go to login, remembering the intercepted route.
    Redirect(NavigationIntent),
}

/// Pure projection of the session onto a route.
pub struct AuthGate;

impl AuthGate {
    pub fn check(session: &Session, route: &Route) -> GateDecision {
        if !route.is_protected() {
            return GateDecision::Render;
        }
        match session {
            Session::Pending => GateDecision::Suspend,
            Session::Resolved(Some(_)) => GateDecision::Render,
            Session::Resolved(None) => {
                match NavigationIntent::new(AuthRoute::Login, Some(route.clone())) {
                    Ok(intent) => GateDecision::Redirect(intent),
                    // Protected routes are never auth routes.
                    Err(_) => GateDecision::Suspend,
                }
            }
        }
    }

    /// Returns `view` only when the gate allows rendering it.
    pub fn guard<V>(session: &Session, route: &Route, view: V) -> Option<V> {
        match Self::check(session, route) {
            GateDecision::Render => Some(view),
            GateDecision::Suspend | GateDecision::Redirect(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserIdentity;

    fn edit(id: &str) -> Route {
        Route::EditListing { id: id.to_string() }
    }

    fn user() -> UserIdentity {
        UserIdentity {
            id: "u1".to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            display_name: "Ana".to_string(),
        }
    }

    #[test]
    fn test_pending_suspends_protected_view() {
        assert_eq!(
            AuthGate::check(&Session::Pending, &edit("5")),
            GateDecision::Suspend
        );
        assert_eq!(AuthGate::guard(&Session::Pending, &edit("5"), "view"), None);
    }

    #[test]
    fn test_anonymous_redirects_with_intercepted_route() {
        let decision = AuthGate::check(&Session::Resolved(None), &edit("5"));
        let GateDecision::Redirect(intent) = decision else {
            panic!("expected redirect, got {decision:?}");
        };
        assert_eq!(intent.target_route(), Route::Login);
        assert_eq!(intent.background(), Some(&edit("5")));
    }

    #[test]
    fn test_authenticated_renders() {
        let session = Session::Resolved(Some(user()));
        assert_eq!(
            AuthGate::check(&session, &Route::CreateListing),
            GateDecision::Render
        );
        assert_eq!(
            AuthGate::guard(&session, &Route::CreateListing, "view"),
            Some("view")
        );
    }

    #[test]
    fn test_unprotected_routes_render_in_every_state() {
        for session in [
            Session::Pending,
            Session::Resolved(None),
            Session::Resolved(Some(user())),
        ] {
            assert_eq!(AuthGate::check(&session, &Route::Homes), GateDecision::Render);
        }
    }

    #[test]
    fn test_redirect_only_when_anonymous() {
        let route = Route::CreateListing;
        let redirects = |s: &Session| matches!(AuthGate::check(s, &route), GateDecision::Redirect(_));
        assert!(!redirects(&Session::Pending));
        assert!(redirects(&Session::Resolved(None)));
        assert!(!redirects(&Session::Resolved(Some(user()))));
    }
}
