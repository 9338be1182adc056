use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, MockState, NodeStatus};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn api_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::ACCEPT, "application/json")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(String::new())
        .unwrap()
}

// --- status ---

#[tokio::test]
async fn status_returns_gui_document() {
    let resp = app().oneshot(api_request("/api/v1.0/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status: NodeStatus = body_json(resp).await;
    assert!(!status.first_view);
    assert!(!status.mining);
    assert!(!status.teleport_address.is_empty());
    assert_eq!(status.currencies, vec!["BTC".to_string(), "BCH".to_string()]);
}

#[tokio::test]
async fn status_without_trailing_slash_is_not_routed() {
    let resp = app().oneshot(api_request("/api/v1.0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_version_is_not_routed() {
    let resp = app().oneshot(api_request("/api/v2.0/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- mining ---

#[tokio::test]
async fn start_mining_sets_flag() {
    let resp = app()
        .oneshot(api_request("/api/v1.0/start_mining"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status: NodeStatus = body_json(resp).await;
    assert!(status.mining);
}

#[tokio::test]
async fn unknown_action_returns_404_with_error() {
    let resp = app()
        .oneshot(api_request("/api/v1.0/self_destruct"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "unknown action: self_destruct");
}

#[tokio::test]
async fn mining_toggle_lifecycle() {
    let state = MockState::new();

    let resp = app_with_state(state.clone())
        .oneshot(api_request("/api/v1.0/start_mining"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(state.status().await.mining);

    let resp = app_with_state(state.clone())
        .oneshot(api_request("/api/v1.0/stop_mining"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let status: NodeStatus = body_json(resp).await;
    assert!(!status.mining);
    assert!(!state.status().await.mining);
}

// --- recording and failure injection ---

#[tokio::test]
async fn requests_are_recorded_with_headers() {
    let state = MockState::new();
    app_with_state(state.clone())
        .oneshot(api_request("/api/v1.0/"))
        .await
        .unwrap();

    let requests = state.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/v1.0/");
    assert_eq!(requests[0].header("accept"), Some("application/json"));
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn failing_state_answers_every_route_with_status() {
    let state = MockState::failing(StatusCode::INTERNAL_SERVER_ERROR);

    for uri in ["/api/v1.0/", "/api/v1.0/start_mining"] {
        let resp = app_with_state(state.clone())
            .oneshot(api_request(uri))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    }

    assert_eq!(state.requests().await.len(), 2);
    assert!(!state.status().await.mining, "failing routes must not act");
}
