use crate::interface::http::problem::problem;
use crate::interface::http::state::AppState;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Builds the metrics route.
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics))
}

/// Prometheus text exposition. 404 when the recorder is not installed.
async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.as_ref() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
            handle.render(),
        )
            .into_response(),
        None => problem(
            StatusCode::NOT_FOUND,
            "HOOK_METRICS_DISABLED",
            Some("metrics are disabled".to_string()),
            None,
        ),
    }
}
