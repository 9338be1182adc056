//! Connection configuration for the teleport GUI API.
//!
//! A `ClientConfig` is built once and handed to `ApiClient::new`; the
//! client keeps it behind an `Arc` and never changes it.

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_API_VERSION: &str = "v1.0";

pub const BASE_URL_ENV: &str = "TELEPORT_API_URL";
pub const API_VERSION_ENV: &str = "TELEPORT_API_VERSION";

/// Base URL, fixed headers, credential mode and versioned path prefix.
///
/// Fields are private so `api_prefix` always matches `api_version`. The
/// `with_*` methods consume the value and recompute the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_version: String,
    api_prefix: String,
    with_credentials: bool,
    headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            api_prefix: format!("/api/{api_version}/"),
            with_credentials: false,
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
        }
    }

    /// Read `TELEPORT_API_URL` and `TELEPORT_API_VERSION`, falling back to
    /// the defaults for whichever is unset.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_version =
            env::var(API_VERSION_ENV).unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        Self::new(&base_url, &api_version)
    }

    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..self
        }
    }

    pub fn with_api_version(self, api_version: &str) -> Self {
        Self {
            api_prefix: format!("/api/{api_version}/"),
            api_version: api_version.to_string(),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `/api/{version}/`, with both slashes.
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn with_credentials(&self) -> bool {
        self.with_credentials
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Absolute URL for `api_prefix` followed by `path`.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}{path}", self.base_url, self.api_prefix)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_API_VERSION)
    }
}
