use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{Credentials, IdentityService, ServiceError, SignupRequest, UserIdentity};
use crate::config::Config;

/// `GET /me` response body.
#[derive(Debug, Deserialize)]
struct MeResponse {
    #[serde(default)]
    data: Option<UserIdentity>,
}

/// Failure body shared by the mutating endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Identity service client over HTTP.
///
/// Every request goes through one `reqwest::Client` with a cookie store, so
/// the session cookie issued by `/login` or `/signup` rides along on `/me`
/// and `/logout`.
#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpIdentityClient {
    /// Builds a client for the configured backend.
    ///
    /// # Errors
    /// Returns an error if the backend URL is rejected or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.backend_url()?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(config.request_timeout())
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(base_url, http))
    }

    /// Builds a client around an existing `reqwest::Client`.
    ///
    /// The client must have a cookie store for sessions to persist.
    pub fn with_client(mut base_url: Url, http: reqwest::Client) -> Self {
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(name)
            .map_err(|e| ServiceError::Transport(format!("invalid endpoint '{name}': {e}")))
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        name: &str,
        body: Option<&B>,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint(name)?;
        debug!(%url, "POST");

        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!(endpoint = name, status = status.as_u16(), "request rejected");
        Err(status_error(status, &body))
    }
}

impl IdentityService for HttpIdentityClient {
    async fn me(&self) -> Result<Option<UserIdentity>, ServiceError> {
        let url = self.endpoint("me")?;
        debug!(%url, "GET");

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: MeResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Transport(format!("invalid /me body: {e}")))?;
        Ok(body.data)
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        self.post("login", Some(credentials)).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ServiceError> {
        self.post("signup", Some(request)).await
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        self.post::<()>("logout", None).await
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

fn status_error(status: StatusCode, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
    ServiceError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let client = HttpIdentityClient::with_client(
            Url::parse("https://api.example.com/v1").unwrap(),
            reqwest::Client::new(),
        );
        assert_eq!(
            client.endpoint("me").unwrap().as_str(),
            "https://api.example.com/v1/me"
        );
    }

    #[test]
    fn test_root_base_url_joins_cleanly() {
        let client = HttpIdentityClient::with_client(
            Url::parse("http://localhost:8080").unwrap(),
            reqwest::Client::new(),
        );
        assert_eq!(
            client.endpoint("logout").unwrap().as_str(),
            "http://localhost:8080/logout"
        );
    }

    #[test]
    fn test_status_error_extracts_error_field() {
        let err = status_error(StatusCode::UNAUTHORIZED, r#"{"error":"Wrong password"}"#);
        assert_eq!(
            err,
            ServiceError::Status {
                status: 401,
                message: Some("Wrong password".to_string()),
            }
        );
    }

    #[test]
    fn test_status_error_tolerates_non_json_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(
            err,
            ServiceError::Status {
                status: 502,
                message: None,
            }
        );
    }
}
