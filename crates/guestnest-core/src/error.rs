//! Error types surfaced by the core.
//!
//! Session resolution never errors: a failed lookup degrades to "anonymous"
//! and is only logged. Mutating auth actions fail with [`AuthError`].

use std::fmt;

use crate::identity::ServiceError;

/// Fallback shown when the service gives no usable message.
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong";

/// Categories of auth action failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Bad credentials or validation failure reported by the service (4xx).
    Rejected,
    /// Transport failure or server-side error (5xx) during the action.
    ActionFailed,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::Rejected => write!(f, "auth_rejected"),
            AuthErrorKind::ActionFailed => write!(f, "auth_action_failed"),
        }
    }
}

/// Failure of `login`, `signup` or `logout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    /// One-line message suitable for inline display on the form.
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self::new(AuthErrorKind::Rejected, or_generic(message))
    }

    pub fn action_failed(message: Option<String>) -> Self {
        Self::new(AuthErrorKind::ActionFailed, or_generic(message))
    }

    /// Classifies a service failure: 4xx is a rejection, everything else
    /// (5xx, transport) is a failed action.
    pub fn from_service(err: ServiceError) -> Self {
        match err {
            ServiceError::Status { status, message } if (400..500).contains(&status) => {
                Self::rejected(message)
            }
            ServiceError::Status { message, .. } => Self::action_failed(message),
            ServiceError::Transport(_) => Self::action_failed(None),
        }
    }

}

fn or_generic(message: Option<String>) -> String {
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string())
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// A required auth form field was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Invalid `NavigationIntent` construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// The target of an intent must be `/login` or `/signup`.
    NotAnAuthRoute(String),
    /// The background of an intent must not itself be an auth route.
    NestedAuthRoute(String),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::NotAnAuthRoute(path) => {
                write!(f, "{path} is not an authentication route")
            }
            IntentError::NestedAuthRoute(path) => {
                write!(f, "background route {path} cannot be an authentication route")
            }
        }
    }
}

impl std::error::Error for IntentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_status_is_rejected_with_server_message() {
        let err = AuthError::from_service(ServiceError::Status {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        });
        assert_eq!(err.kind, AuthErrorKind::Rejected);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[test]
    fn test_rejection_without_message_uses_generic() {
        let err = AuthError::from_service(ServiceError::Status {
            status: 409,
            message: Some("   ".to_string()),
        });
        assert_eq!(err.kind, AuthErrorKind::Rejected);
        assert_eq!(err.message, GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn test_server_status_is_action_failure() {
        let err = AuthError::from_service(ServiceError::Status {
            status: 503,
            message: None,
        });
        assert_eq!(err.kind, AuthErrorKind::ActionFailed);
        assert_eq!(err.message, GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn test_transport_failure_hides_transport_detail() {
        let err = AuthError::from_service(ServiceError::Transport(
            "error sending request: connection refused".to_string(),
        ));
        assert_eq!(err.kind, AuthErrorKind::ActionFailed);
        assert_eq!(err.to_string(), GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn test_validation_message_names_field() {
        assert_eq!(
            ValidationError::MissingField("Password").to_string(),
            "Password is required"
        );
    }
}
