//! Transport seam between the facade and the network.
//!
//! `ApiClient` is generic over `Transport`, so tests can swap in an
//! in-memory implementation. `ReqwestTransport` is the one used against a
//! real server.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single `HttpRequest`.
///
/// Implementations return whatever status the server sent, 4xx and 5xx
/// included; deciding what counts as failure is up to the caller. They must
/// not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// `Transport` backed by `reqwest`.
///
/// The inner client is built without a cookie store, so no credentials are
/// ever attached to outgoing requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client. The caller is responsible for not enabling
    /// a cookie store on it.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.with_credentials {
            return Err(TransportError::CredentialsUnsupported);
        }

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ResponseBody(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn credentialed_requests_are_refused() {
        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/api/v1.0/".to_string(),
            headers: Vec::new(),
            with_credentials: true,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, TransportError::CredentialsUnsupported));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let transport = ReqwestTransport::new().unwrap();
        // Port 1 on loopback is not expected to be listening.
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/api/v1.0/".to_string(),
            headers: Vec::new(),
            with_credentials: false,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
