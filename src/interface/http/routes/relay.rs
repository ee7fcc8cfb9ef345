// HTTP routes: delivery relay peer interface.

use crate::interface::http::dto::relay::{RelayTargetResponse, RelayTargetsResponse};
use crate::interface::http::dto::subscription::{IngestResultsRequest, SearchQuery};
use crate::interface::http::problem::{from_use_case_error, malformed};
use crate::interface::http::routes::subscription::convert_results;
use crate::interface::http::state::AppState;
use crate::interface::relay::RelayPeer;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

/// Builds relay routes. These sit behind the internal network, not the gateway.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/internal/relay/subscriptions", get(search_targets))
        .route("/internal/relay/results", post(report_results))
}

/// Active subscribers for an event.
async fn search_targets(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let event = query.event.trim();
    if event.is_empty() {
        return malformed("event is required");
    }
    match state.relay.search(event).await {
        Ok(targets) => Json(RelayTargetsResponse {
            targets: targets.into_iter().map(RelayTargetResponse::from).collect(),
        })
        .into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Delivery outcomes pushed back by the relay.
async fn report_results(
    State(state): State<AppState>,
    Json(payload): Json<IngestResultsRequest>,
) -> Response {
    let results = match convert_results(payload.results) {
        Ok(results) => results,
        Err(response) => return response,
    };
    match state.relay.report_results(results).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => from_use_case_error(&err),
    }
}
