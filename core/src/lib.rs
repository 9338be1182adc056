//! Async API client for the teleport node's GUI backend.
//!
//! # Overview
//! `ApiClient` wraps the two endpoints the web UI needs: the node status
//! document (`get_data`) and the mining switch (`toggle_mining`). Both are
//! plain GETs under a versioned prefix (`/api/v1.0/`) with JSON headers.
//!
//! # Design
//! - `ClientConfig` is built by the caller and injected; there is no global
//!   client.
//! - Requests are built as data (`build_*`) and executed through the
//!   `Transport` trait, so tests can substitute an in-memory transport.
//! - Responses come back as an `HttpResponse` envelope. The body is not
//!   parsed; non-2xx statuses become `ApiError::Http`.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use action::MiningAction;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
