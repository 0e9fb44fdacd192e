//! Configuration management for GuestNest.
//!
//! Loads configuration from ${GUESTNEST_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Env var overriding `backend_url`.
pub const BACKEND_URL_ENV: &str = "GUESTNEST_BACKEND_URL";

/// Env var overriding `log_filter`.
pub const LOG_ENV: &str = "GUESTNEST_LOG";

pub mod paths {
    //! Path resolution for GuestNest configuration and data directories.
    //!
    //! GUESTNEST_HOME resolution order:
    //! 1. GUESTNEST_HOME environment variable (if set)
    //! 2. ~/.config/guestnest (default)
    //! 3. ./.guestnest when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the GuestNest home directory.
    pub fn guestnest_home() -> PathBuf {
        if let Ok(home) = std::env::var("GUESTNEST_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".guestnest"),
            |h| h.join(".config").join("guestnest"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        guestnest_home().join("config.toml")
    }

    /// Returns the directory the interactive client writes its log file to.
    pub fn logs_dir() -> PathBuf {
        guestnest_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the identity/listing backend.
    pub backend_url: String,
    /// Allow a localhost backend in release builds.
    ///
    /// Session cookies are issued for the backend host, so a release build
    /// pointed at localhost silently loses every session.
    pub allow_localhost_in_release: bool,
    /// Connect/read timeout for HTTP requests, in seconds.
    pub request_timeout_secs: u64,
    /// `tracing` filter directive (e.g. `info`, `guestnest_core=debug`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            allow_localhost_in_release: false,
            request_timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:8080";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default path, then applies env overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies environment overrides using the given lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter.trim().to_string();
        }
    }

    /// Parses `backend_url`, enforcing the release-build localhost guard.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or points at localhost in a
    /// release build without `allow_localhost_in_release`.
    pub fn backend_url(&self) -> Result<Url> {
        self.backend_url_for_build(cfg!(debug_assertions))
    }

    fn backend_url_for_build(&self, debug_build: bool) -> Result<Url> {
        let url = Url::parse(&self.backend_url)
            .with_context(|| format!("Invalid backend_url '{}'", self.backend_url))?;

        if !debug_build && !self.allow_localhost_in_release && is_localhost(&url) {
            bail!(
                "backend_url points at {url} in a release build.\n\
                 Set {BACKEND_URL_ENV} (or backend_url in config.toml) to the deployed backend; \
                 session cookies will not survive a localhost fallback."
            );
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Writes the default config template to `path` if it does not exist.
    ///
    /// Returns `true` when a file was created.
    ///
    /// # Errors
    /// Returns an error if the parent directory or file cannot be written.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }
}

fn is_localhost(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("localhost" | "127.0.0.1" | "[::1]" | "::1")
    )
}

/// Returns the commented default config.toml contents.
pub fn default_config_template() -> &'static str {
    r#"# GuestNest client configuration

# Backend serving /me, /login, /signup and /logout.
# Overridden by GUESTNEST_BACKEND_URL.
backend_url = "http://localhost:8080"

# Release builds refuse a localhost backend unless this is true.
allow_localhost_in_release = false

# HTTP connect/read timeout in seconds.
request_timeout_secs = 30

# tracing filter (overridden by GUESTNEST_LOG).
log_filter = "info"
"#
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = \"https://api.guestnest.example\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend_url, "https://api.guestnest.example");
        assert_eq!(config.request_timeout_secs, Config::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides_backend_and_filter() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            BACKEND_URL_ENV => Some(" https://api.example.com ".to_string()),
            LOG_ENV => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(config.backend_url, "https://api.example.com");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_release_build_rejects_localhost() {
        let config = Config::default();
        assert!(config.backend_url_for_build(true).is_ok());
        let err = config.backend_url_for_build(false).unwrap_err();
        assert!(err.to_string().contains("release build"));
    }

    #[test]
    fn test_release_build_localhost_can_be_allowed() {
        let config = Config {
            allow_localhost_in_release: true,
            ..Config::default()
        };
        assert!(config.backend_url_for_build(false).is_ok());
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let config = Config {
            backend_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.backend_url().is_err());
    }

    #[test]
    fn test_init_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(Config::init_at(&path).unwrap());
        assert!(!Config::init_at(&path).unwrap());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
