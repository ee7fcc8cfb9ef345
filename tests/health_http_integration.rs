mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{memory_state, response_json};
use tower::util::ServiceExt;
use webhook_registry::interface::http;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn given_memory_backend_when_ready_should_report_ready() {
    let response = http::app(memory_state()).oneshot(get("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "ready");
}

#[tokio::test]
async fn given_metrics_disabled_when_scraped_should_return_not_found() {
    let response = http::app(memory_state())
        .oneshot(get("/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_request_id_when_calling_should_echo_it_back() {
    let response = http::app(memory_state())
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}

#[tokio::test]
async fn given_no_request_id_when_calling_should_mint_one() {
    let response = http::app(memory_state())
        .oneshot(get("/health"))
        .await
        .unwrap();

    let minted = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(minted).is_ok());
}
