//! Remote identity service seam.
//!
//! The core talks to the identity backend only through [`IdentityService`].
//! [`HttpIdentityClient`] is the production implementation; tests plug in
//! in-memory fakes.

mod http;

use std::fmt;
use std::future::Future;

pub use http::HttpIdentityClient;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Authenticated visitor as reported by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
}

impl UserIdentity {
    /// Uppercased first character of the username, used as an avatar.
    pub fn initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| {
            let mut upper = c.to_uppercase();
            upper.next().unwrap_or(c)
        })
    }

    /// Display name, falling back to the username when the account has none.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Failure reported by an [`IdentityService`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    Status {
        status: u16,
        /// `error` field of the response body, when present.
        message: Option<String>,
    },
    /// The request never produced a response (connect, TLS, timeout, decode).
    Transport(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Status {
                status,
                message: Some(message),
            } => write!(f, "HTTP {status}: {message}"),
            ServiceError::Status {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            ServiceError::Transport(detail) => write!(f, "transport error: {detail}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Login payload: `{ identifier, password }`.
///
/// Only constructible with both fields populated.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// Builds login credentials. The identifier (username or email) is trimmed;
    /// the password is kept verbatim.
    ///
    /// # Errors
    /// Returns `MissingField` if either field is empty.
    pub fn new(
        identifier: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let identifier = required(identifier.into(), "Username or email", true)?;
        let password = required(password.into(), "Password", false)?;
        Ok(Self {
            identifier,
            password,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup payload: `{ username, email, password, name }`.
///
/// Only constructible with all four fields populated.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    username: String,
    email: String,
    password: String,
    #[serde(rename = "name")]
    display_name: String,
}

impl SignupRequest {
    /// Builds a signup request. Text fields are trimmed; the password is kept
    /// verbatim.
    ///
    /// # Errors
    /// Returns `MissingField` for the first empty field.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: required(username.into(), "Username", true)?,
            email: required(email.into(), "Email", true)?,
            password: required(password.into(), "Password", false)?,
            display_name: required(display_name.into(), "Full name", true)?,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

fn required(value: String, field: &'static str, trim: bool) -> Result<String, ValidationError> {
    let value = if trim {
        value.trim().to_string()
    } else {
        value
    };
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Remote identity operations used by the session store.
///
/// Session continuity is carried by the implementation (a cookie jar for the
/// HTTP client); callers never see a token.
pub trait IdentityService: Send + Sync + 'static {
    /// `GET /me`. `Ok(None)` when the service reports no authenticated user.
    fn me(&self) -> impl Future<Output = Result<Option<UserIdentity>, ServiceError>> + Send;

    /// `POST /login`.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// `POST /signup`.
    fn signup(
        &self,
        request: &SignupRequest,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// `POST /logout`.
    fn logout(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_deserializes_name_field() {
        let user: UserIdentity = serde_json::from_str(
            r#"{"id":"u1","username":"ana","email":"ana@example.com","name":"Ana Lima"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name, "Ana Lima");
        assert_eq!(user.initial(), Some('A'));
        assert_eq!(user.label(), "Ana Lima");
    }

    #[test]
    fn test_identity_without_name_labels_with_username() {
        let user: UserIdentity =
            serde_json::from_str(r#"{"id":"u1","username":"ana","email":"a@b.c"}"#).unwrap();
        assert_eq!(user.label(), "ana");
    }

    #[test]
    fn test_credentials_trim_identifier_but_not_password() {
        let creds = Credentials::new("  ana@example.com ", " secret ").unwrap();
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["identifier"], "ana@example.com");
        assert_eq!(json["password"], " secret ");
    }

    #[test]
    fn test_credentials_require_both_fields() {
        assert_eq!(
            Credentials::new("", "pw").unwrap_err(),
            ValidationError::MissingField("Username or email")
        );
        assert_eq!(
            Credentials::new("ana", "").unwrap_err(),
            ValidationError::MissingField("Password")
        );
    }

    #[test]
    fn test_signup_rejects_empty_password() {
        let err = SignupRequest::new("ana", "ana@example.com", "", "Ana").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Password"));
    }

    #[test]
    fn test_signup_requires_display_name() {
        let err = SignupRequest::new("ana", "ana@example.com", "pw", "  ").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Full name"));
    }

    #[test]
    fn test_signup_serializes_wire_names() {
        let req = SignupRequest::new(" ana ", "ana@example.com", "pw", "Ana Lima").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["username"], "ana");
        assert_eq!(json["name"], "Ana Lima");
        assert!(json.get("display_name").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("ana", "hunter2").unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
        let req = SignupRequest::new("ana", "a@b.c", "hunter2", "Ana").unwrap();
        assert!(!format!("{req:?}").contains("hunter2"));
    }
}
