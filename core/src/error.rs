//! Error types for the teleport API client.
//!
//! # Design
//! `TransportError` covers failures to complete a round-trip at all.
//! `ApiError` is what callers of `ApiClient` see: a rejected action, a
//! transport failure, or a completed request whose status was not 2xx. The
//! raw status and body are kept for the caller to interpret.

use thiserror::Error;

/// Failures raised by a `Transport` before a response is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout and similar.
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    ResponseBody(String),

    /// The transport was asked to forward credentials, which it never does.
    #[error("credential forwarding is not supported")]
    CredentialsUnsupported,
}

/// Errors returned by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The action cannot be used as a single URL path segment.
    #[error("invalid action {0:?}: expected ASCII letters, digits, '_' or '-'")]
    InvalidAction(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
