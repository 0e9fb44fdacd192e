//! Routes, navigation intents and the history model.

use std::fmt;

use crate::error::IntentError;

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Homes,
    Experiences,
    Services,
    Listing { id: String },
    CreateListing,
    EditListing { id: String },
    Login,
    Signup,
    /// Catch-all; keeps the requested path for display.
    NotFound(String),
}

impl Route {
    /// Parses a path. Unknown paths map to `NotFound`.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["homes"] => Route::Homes,
            ["experiences"] => Route::Experiences,
            ["services"] => Route::Services,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["listings", "create"] => Route::CreateListing,
            ["listings", id] => Route::Listing {
                id: (*id).to_string(),
            },
            ["listings", id, "edit"] => Route::EditListing {
                id: (*id).to_string(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Homes => "/homes".to_string(),
            Route::Experiences => "/experiences".to_string(),
            Route::Services => "/services".to_string(),
            Route::Listing { id } => format!("/listings/{id}"),
            Route::CreateListing => "/listings/create".to_string(),
            Route::EditListing { id } => format!("/listings/{id}/edit"),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    /// Owner-only views that sit behind the auth gate.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::CreateListing | Route::EditListing { .. })
    }

    pub fn as_auth(&self) -> Option<AuthRoute> {
        match self {
            Route::Login => Some(AuthRoute::Login),
            Route::Signup => Some(AuthRoute::Signup),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// The authentication routes an intent can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRoute {
    Login,
    Signup,
}

impl AuthRoute {
    pub fn route(self) -> Route {
        match self {
            AuthRoute::Login => Route::Login,
            AuthRoute::Signup => Route::Signup,
        }
    }

    /// The other auth form (login ↔ signup).
    pub fn other(self) -> Self {
        match self {
            AuthRoute::Login => AuthRoute::Signup,
            AuthRoute::Signup => AuthRoute::Login,
        }
    }
}

impl TryFrom<Route> for AuthRoute {
    type Error = IntentError;

    fn try_from(route: Route) -> Result<Self, Self::Error> {
        route
            .as_auth()
            .ok_or_else(|| IntentError::NotAnAuthRoute(route.path()))
    }
}

/// Navigation state attached when moving to an auth route from inside the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    target: AuthRoute,
    background: Option<Route>,
}

impl NavigationIntent {
    /// # Errors
    /// Returns `NestedAuthRoute` if the background is itself an auth route.
    pub fn new(target: AuthRoute, background: Option<Route>) -> Result<Self, IntentError> {
        if let Some(bg) = &background
            && bg.is_auth()
        {
            return Err(IntentError::NestedAuthRoute(bg.path()));
        }
        Ok(Self { target, background })
    }

    pub fn target(&self) -> AuthRoute {
        self.target
    }

    pub fn target_route(&self) -> Route {
        self.target.route()
    }

    pub fn background(&self) -> Option<&Route> {
        self.background.as_ref()
    }

    /// Same background, other form. Used when switching login ↔ signup.
    #[must_use]
    pub fn retarget(&self, target: AuthRoute) -> Self {
        Self {
            target,
            background: self.background.clone(),
        }
    }
}

/// One history entry: the address plus any attached intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub intent: Option<NavigationIntent>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            intent: None,
        }
    }

    /// Entry for an auth route carrying `intent`.
    pub fn auth(intent: NavigationIntent) -> Self {
        Self {
            route: intent.target_route(),
            intent: Some(intent),
        }
    }

    pub fn background(&self) -> Option<&Route> {
        self.intent.as_ref().and_then(NavigationIntent::background)
    }
}

/// Browser-style session history.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    /// History with a single entry, as on first page load.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Entry one step back, if any.
    pub fn previous(&self) -> Option<&Location> {
        self.index.checked_sub(1).map(|i| &self.entries[i])
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Pushes a new entry, dropping any forward entries.
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Replaces the current entry.
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Steps back one entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Steps forward one entry. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::new(Route::Home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/homes/"), Route::Homes);
        assert_eq!(Route::parse("/listings/create"), Route::CreateListing);
        assert_eq!(
            Route::parse("/listings/5"),
            Route::Listing {
                id: "5".to_string()
            }
        );
        assert_eq!(
            Route::parse("/listings/5/edit?tab=photos"),
            Route::EditListing {
                id: "5".to_string()
            }
        );
        assert_eq!(Route::parse("/signup"), Route::Signup);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            Route::parse("/help-center"),
            Route::NotFound("/help-center".to_string())
        );
    }

    #[test]
    fn test_path_round_trips_for_known_routes() {
        for path in [
            "/",
            "/homes",
            "/experiences",
            "/services",
            "/listings/9",
            "/listings/create",
            "/listings/9/edit",
            "/login",
            "/signup",
        ] {
            assert_eq!(Route::parse(path).path(), path);
        }
    }

    #[test]
    fn test_protected_and_auth_flags() {
        assert!(Route::CreateListing.is_protected());
        assert!(Route::parse("/listings/1/edit").is_protected());
        assert!(!Route::parse("/listings/1").is_protected());
        assert!(Route::Login.is_auth());
        assert!(!Route::Home.is_auth());
    }

    #[test]
    fn test_intent_rejects_auth_background() {
        let err = NavigationIntent::new(AuthRoute::Login, Some(Route::Signup)).unwrap_err();
        assert_eq!(err, IntentError::NestedAuthRoute("/signup".to_string()));
    }

    #[test]
    fn test_intent_rejects_non_auth_target() {
        let err = AuthRoute::try_from(Route::Homes).unwrap_err();
        assert_eq!(err, IntentError::NotAnAuthRoute("/homes".to_string()));
    }

    #[test]
    fn test_retarget_keeps_background() {
        let intent = NavigationIntent::new(AuthRoute::Login, Some(Route::Homes)).unwrap();
        let switched = intent.retarget(AuthRoute::Signup);
        assert_eq!(switched.target_route(), Route::Signup);
        assert_eq!(switched.background(), Some(&Route::Homes));
    }

    #[test]
    fn test_history_push_truncates_forward_entries() {
        let mut history = History::default();
        history.push(Location::new(Route::Homes));
        history.push(Location::new(Route::Services));
        assert!(history.back());
        history.push(Location::new(Route::Experiences));

        assert_eq!(history.len(), 3);
        assert_eq!(history.current().route, Route::Experiences);
        assert!(!history.forward());
    }

    #[test]
    fn test_history_back_stops_at_first_entry() {
        let mut history = History::default();
        assert!(!history.can_go_back());
        assert!(!history.back());
        assert_eq!(history.current().route, Route::Home);
        assert!(history.previous().is_none());
    }

    #[test]
    fn test_history_replace_keeps_length() {
        let mut history = History::default();
        history.push(Location::new(Route::Homes));
        history.replace(Location::new(Route::Services));
        assert_eq!(history.len(), 2);
        assert_eq!(history.previous().unwrap().route, Route::Home);
        assert_eq!(history.current().route, Route::Services);
    }
}
