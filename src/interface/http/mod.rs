pub mod dto;
pub mod identity;
pub mod problem;
pub mod routes;
pub mod state;
pub mod trace;

use axum::{Router, middleware};
use state::AppState;

/// Full HTTP surface. The request id layer is outermost so every log line carries it.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::ready::router())
        .merge(routes::metrics::router())
        .merge(routes::subscription::router())
        .merge(routes::relay::router())
        .layer(middleware::from_fn(trace::request_log_middleware))
        .layer(middleware::from_fn(trace::request_id_middleware))
        .with_state(state)
}
