//! Facade over the teleport GUI JSON API.
//!
//! # Design
//! `ApiClient` holds an immutable `ClientConfig` and a `Transport`. Each
//! operation first builds an `HttpRequest` (`build_*`), then hands it to the
//! transport exactly once. Response bodies are passed through untouched;
//! only the status is inspected, so a non-2xx answer becomes an error
//! instead of a value. There is no caching and no retry.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::action::validate_action;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Client for the node status and mining control endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET on the API prefix itself.
    pub fn build_get_data(&self) -> HttpRequest {
        self.build_get("")
    }

    /// GET on `prefix + action`. Fails without building anything if the
    /// action is not a plain path segment.
    pub fn build_toggle_mining(&self, action: &str) -> Result<HttpRequest, ApiError> {
        let action = validate_action(action).inspect_err(|_| {
            warn!(action, "rejected mining action");
        })?;
        Ok(self.build_get(action))
    }

    /// Fetch the node status document.
    pub async fn get_data(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.build_get_data()).await
    }

    /// Issue a mining control command, e.g. `MiningAction::Start`.
    pub async fn toggle_mining(&self, action: impl AsRef<str>) -> Result<HttpResponse, ApiError> {
        let request = self.build_toggle_mining(action.as_ref())?;
        self.send(request).await
    }

    fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.url_for(path),
            headers: self.config.headers().to_vec(),
            with_credentials: self.config.with_credentials(),
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let url = request.url.clone();
        let response = self.transport.execute(request).await?;
        check_status(response).inspect_err(|e| {
            warn!(%url, error = %e, "request failed");
        })
    }
}

/// Map non-2xx responses to `ApiError::Http`, keeping the raw body.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body,
    })
}
