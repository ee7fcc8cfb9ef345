#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;
use webhook_registry::application::context::AppContext;
use webhook_registry::config::Subscriptions;
use webhook_registry::infrastructure::db::repositories::Repositories;
use webhook_registry::interface::http::state::AppState;

pub fn test_db_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

pub fn limits() -> Subscriptions {
    Subscriptions {
        history_limit: 100,
        max_history_limit: 500,
    }
}

/// HTTP state over in-memory stores, metrics disabled.
pub fn memory_state() -> AppState {
    AppState::new(
        Arc::new(AppContext::new(Repositories::in_memory(), limits())),
        None,
    )
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

pub fn user_request(method: &str, uri: &str, user: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user);
    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn relay_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
