//! In-process stand-in for the teleport node's GUI backend.
//!
//! Serves the status document under `/api/v1.0/` and the `start_mining` /
//! `stop_mining` switches, records every API request it sees, and can be
//! told to fail every call with a fixed status.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub use axum::http::StatusCode;

pub const API_VERSION: &str = "v1.0";

const CURRENCIES: [&str; 2] = ["BTC", "BCH"];

/// The JSON document returned by every API route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeStatus {
    pub teleport_address: String,
    pub deposit_addresses: BTreeMap<String, Vec<String>>,
    pub withdrawn_addresses: BTreeMap<String, Vec<String>>,
    pub currencies: Vec<String>,
    pub info: Value,
    pub first_view: bool,
    pub mining: bool,
}

impl NodeStatus {
    fn new() -> Self {
        let currencies: Vec<String> = CURRENCIES.iter().map(|c| c.to_string()).collect();
        let empty = || currencies.iter().map(|c| (c.clone(), Vec::new())).collect();
        Self {
            teleport_address: String::new(),
            deposit_addresses: empty(),
            withdrawn_addresses: empty(),
            currencies: currencies.clone(),
            info: json!({ "balance": 0, "blocks": 0, "connections": 0 }),
            first_view: true,
            mining: false,
        }
    }
}

/// Path and headers of a request that reached the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
struct Node {
    status: NodeStatus,
    addresses_issued: u64,
}

impl Node {
    fn new_address(&mut self) -> String {
        self.addresses_issued += 1;
        format!("tp1mock{:08x}", self.addresses_issued)
    }
}

/// Shared server state. Cloning shares the same node and request log.
#[derive(Clone, Debug)]
pub struct MockState {
    node: Arc<RwLock<Node>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    fail_with: Option<StatusCode>,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            node: Arc::new(RwLock::new(Node {
                status: NodeStatus::new(),
                addresses_issued: 0,
            })),
            requests: Arc::new(RwLock::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Every API route answers with `status` instead of doing any work.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::new()
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn status(&self) -> NodeStatus {
        self.node.read().await.status.clone()
    }

    /// Hand out a teleport address on first view, then return the status.
    async fn refresh(&self) -> NodeStatus {
        let mut node = self.node.write().await;
        if node.status.first_view {
            node.status.teleport_address = node.new_address();
            node.status.first_view = false;
        }
        node.status.clone()
    }

    async fn set_mining(&self, mining: bool) {
        self.node.write().await.status.mining = mining;
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn app() -> Router {
    app_with_state(MockState::new())
}

pub fn app_with_state(state: MockState) -> Router {
    let api = format!("/api/{API_VERSION}/");
    Router::new()
        .route(&api, get(node_status))
        .route(&format!("{api}{{action}}"), get(mining_action))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock teleport API listening");
    }
    axum::serve(listener, app_with_state(state).layer(TraceLayer::new_for_http())).await
}

async fn record_request(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        path: request.uri().path().to_string(),
        headers: request
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect(),
    };
    debug!(path = %recorded.path, "recorded request");
    state.requests.write().await.push(recorded);

    if let Some(status) = state.fail_with {
        return (status, Json(json!({ "error": "injected failure" }))).into_response();
    }
    next.run(request).await
}

async fn node_status(State(state): State<MockState>) -> Json<NodeStatus> {
    Json(state.refresh().await)
}

async fn mining_action(
    State(state): State<MockState>,
    Path(action): Path<String>,
) -> Result<Json<NodeStatus>, (StatusCode, Json<Value>)> {
    let mining = match action.as_str() {
        "start_mining" => true,
        "stop_mining" => false,
        _ => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("unknown action: {action}") })),
            ))
        }
    };
    state.set_mining(mining).await;
    info!(mining, "mining toggled");
    Ok(Json(state.refresh().await))
}
