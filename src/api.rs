use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::charts::catalogue;
use crate::config::AppConfig;
use crate::formatter::format_large_number;
use crate::shaping::label_records;
use crate::stoploss::{StoplossDataClient, StoplossQueryParams};

pub struct AppState {
    pub client: StoplossDataClient,
    pub config: AppConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stoploss", get(get_stoploss))
        .route("/stoploss/labels", get(get_stoploss_labels))
        .route("/format", get(format_value))
        .route("/charts", get(get_charts))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) -> std::io::Result<()> {
    let addr = state.config.server.bind_addr.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct StoplossQuery {
    pub uid: Option<String>,
    pub session_id: Option<String>,
}

impl StoplossQuery {
    /// Fill missing fields from the configured defaults.
    pub fn resolve(self, defaults: &StoplossQueryParams) -> StoplossQueryParams {
        StoplossQueryParams {
            uid: self.uid.unwrap_or_else(|| defaults.uid.clone()),
            session_id: self.session_id.unwrap_or_else(|| defaults.session_id.clone()),
        }
    }
}

pub async fn get_stoploss(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoplossQuery>,
) -> impl IntoResponse {
    let params = query.resolve(&state.config.defaults);
    let result = state.client.get_stoploss_data(Some(params)).await;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(result))
}

/// Display labels for every numeric field of the fetched records.
pub async fn get_stoploss_labels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoplossQuery>,
) -> impl IntoResponse {
    let params = query.resolve(&state.config.defaults);
    let result = state.client.get_stoploss_data(Some(params)).await;

    match result.data() {
        Some(records) => (StatusCode::OK, Json(json!(label_records(records)))),
        None => (StatusCode::BAD_GATEWAY, Json(json!(result))),
    }
}

#[derive(Debug, Deserialize)]
pub struct FormatParams {
    pub value: f64,
}

pub async fn format_value(Query(params): Query<FormatParams>) -> impl IntoResponse {
    match format_large_number(params.value) {
        Ok(formatted) => (
            StatusCode::OK,
            Json(json!({"value": params.value, "formatted": formatted})),
        ),
        Err(e) => (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))),
    }
}

pub async fn get_charts() -> impl IntoResponse {
    Json(catalogue())
}
