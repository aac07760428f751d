//! Integration tests for the stoploss data layer.
//! These tests run the reqwest transport against a local fake upstream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use stoploss_viz::api::{self, AppState, FormatParams, StoplossQuery};
use stoploss_viz::config::AppConfig;
use stoploss_viz::stoploss::{HttpTransport, StoplossDataClient, StoplossQueryParams, StoplossResult};

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn upstream(body: &'static str) -> Router {
    Router::new().route("/stoploss-optimizooor", get(move || async move { body }))
}

/// Echoes the query back inside a payload that uses bareword NaN.
fn echo_upstream() -> Router {
    Router::new().route(
        "/stoploss-optimizooor",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            format!(
                r#"{{"data":[{{"uid":"{}","session_id":"{}","pnl":NaN,"stoploss":0.5}}]}}"#,
                q.get("uid").cloned().unwrap_or_default(),
                q.get("session_id").cloned().unwrap_or_default()
            )
        }),
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Default params reach the upstream and NaN comes back as null
#[tokio::test]
async fn test_http_fetch_with_default_params() {
    let base = spawn_upstream(echo_upstream()).await;
    let client = StoplossDataClient::with_http(base);

    let result = client.get_stoploss_data(None).await;

    assert_eq!(
        result,
        StoplossResult::Success {
            data: vec![json!({
                "uid": "test_data",
                "session_id": "session12394",
                "pnl": null,
                "stoploss": 0.5
            })]
        }
    );
}

#[tokio::test]
async fn test_http_fetch_with_explicit_params() {
    let base = spawn_upstream(echo_upstream()).await;
    let client = StoplossDataClient::with_http(format!("{}/", base));

    let data = client
        .get_stoploss_data(Some(StoplossQueryParams::new("carol", "s-42")))
        .await
        .into_result()
        .unwrap();

    assert_eq!(data[0]["uid"], "carol");
    assert_eq!(data[0]["session_id"], "s-42");
}

#[tokio::test]
async fn test_http_empty_body() {
    let base = spawn_upstream(upstream("")).await;
    let result = StoplossDataClient::with_http(base).get_stoploss_data(None).await;

    assert_eq!(result.error(), Some("Invalid response format"));
}

#[tokio::test]
async fn test_http_truncated_body() {
    let base = spawn_upstream(upstream(r#"{"data":[{"pnl":NaN"#)).await;
    let result = StoplossDataClient::with_http(base).get_stoploss_data(None).await;

    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("EOF"));
}

#[tokio::test]
async fn test_http_server_error_status() {
    let router = Router::new().route(
        "/stoploss-optimizooor",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, r#"{"data":[]}"#) }),
    );
    let base = spawn_upstream(router).await;
    let result = StoplossDataClient::with_http(base).get_stoploss_data(None).await;

    assert_eq!(result.error(), Some("Request failed with status code 500"));
}

#[tokio::test]
async fn test_http_not_found_status() {
    let base = spawn_upstream(Router::new()).await;
    let result = StoplossDataClient::with_http(base).get_stoploss_data(None).await;

    assert_eq!(result.error(), Some("Request failed with status code 404"));
}

#[tokio::test]
async fn test_http_timeout_is_folded() {
    let router = Router::new().route(
        "/stoploss-optimizooor",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            r#"{"data":[]}"#
        }),
    );
    let base = spawn_upstream(router).await;
    let transport = HttpTransport::with_timeout(Some(Duration::from_millis(100))).unwrap();
    let client = StoplossDataClient::new(base, Arc::new(transport));

    let result = client.get_stoploss_data(None).await;

    assert!(!result.is_success());
    assert!(!result.error().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_connection_refused_is_folded() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = StoplossDataClient::with_http(format!("http://{}", addr));
    let result = client.get_stoploss_data(None).await;

    assert!(!result.is_success());
    assert!(!result.error().unwrap().is_empty());
}

/// Concurrent calls share one client without interfering
#[tokio::test]
async fn test_concurrent_fetches() {
    let base = spawn_upstream(echo_upstream()).await;
    let client = StoplossDataClient::with_http(base);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .get_stoploss_data(Some(StoplossQueryParams::new(format!("u{}", i), "s")))
                    .await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let data = handle.await.unwrap().into_result().unwrap();
        assert_eq!(data[0]["uid"], format!("u{}", i));
    }
}

// ============= API Facade Tests =============

async fn facade_state(base_url: String) -> Arc<AppState> {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.clone();
    config.defaults = StoplossQueryParams::new("configured", "session-cfg");

    Arc::new(AppState {
        client: StoplossDataClient::with_http(base_url),
        config,
    })
}

#[tokio::test]
async fn test_facade_stoploss_uses_configured_defaults() {
    let base = spawn_upstream(echo_upstream()).await;
    let state = facade_state(base).await;

    let response = api::get_stoploss(
        State(state),
        Query(StoplossQuery {
            uid: None,
            session_id: Some("override".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["uid"], "configured");
    assert_eq!(body["data"][0]["session_id"], "override");
    assert!(body["data"][0]["pnl"].is_null());
}

#[tokio::test]
async fn test_facade_stoploss_failure_is_bad_gateway() {
    let base = spawn_upstream(upstream("")).await;
    let state = facade_state(base).await;

    let response = api::get_stoploss(State(state), Query(StoplossQuery::default()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "Invalid response format"})
    );
}

#[tokio::test]
async fn test_facade_stoploss_labels() {
    let router = Router::new().route(
        "/stoploss-optimizooor",
        get(|| async { r#"{"data":[{"pnl":1250000,"stoploss":0.125,"ev":NaN},{"pnl":-1250}]}"# }),
    );
    let base = spawn_upstream(router).await;
    let state = facade_state(base).await;

    let response = api::get_stoploss_labels(State(state), Query(StoplossQuery::default()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"pnl": "1.3M", "stoploss": "0.13"}, {"pnl": "-1.3K"}])
    );
}

#[tokio::test]
async fn test_facade_stoploss_labels_failure() {
    let base = spawn_upstream(upstream("")).await;
    let state = facade_state(base).await;

    let response = api::get_stoploss_labels(State(state), Query(StoplossQuery::default()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "Invalid response format"})
    );
}

#[tokio::test]
async fn test_facade_format() {
    let response = api::format_value(Query(FormatParams { value: -2_500_000.0 }))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"value": -2_500_000.0, "formatted": "-2.5M"})
    );

    let response = api::format_value(Query(FormatParams { value: f64::INFINITY }))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_facade_served_over_http() {
    let base = spawn_upstream(echo_upstream()).await;
    let facade = spawn_upstream(api::router(facade_state(base).await)).await;

    let charts: Value = reqwest::get(format!("{}/charts", facade))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(charts.as_array().unwrap().len(), 3);
    assert_eq!(charts[1]["kind"], "differentiator");

    let health: Value = reqwest::get(format!("{}/health", facade))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let formatted: Value = reqwest::get(format!("{}/format?value=1500", facade))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(formatted["formatted"], "1.5K");

    let labels: Value = reqwest::get(format!("{}/stoploss/labels", facade))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(labels[0]["stoploss"], "0.5");

    let stoploss: Value = reqwest::get(format!("{}/stoploss?uid=dave", facade))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stoploss["data"][0]["uid"], "dave");
    assert_eq!(stoploss["data"][0]["session_id"], "session-cfg");
}
