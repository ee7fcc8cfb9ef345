mod common;

use axum::http::StatusCode;
use common::{memory_state, relay_request, response_json, user_request};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tower::util::ServiceExt;
use webhook_registry::interface::http;
use webhook_registry::interface::http::state::AppState;

async fn send(state: &AppState, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = http::app(state.clone()).oneshot(req).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

async fn create(state: &AppState, user: &str, event: &str) -> String {
    let (status, body) = send(
        state,
        user_request(
            "POST",
            "/subscriptions",
            user,
            Some(json!({"url": "https://a.test/hook", "events": [event]})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["subscriptions"][0]["id"].as_str().unwrap().to_string()
}

fn parse_time(value: &Value) -> OffsetDateTime {
    OffsetDateTime::parse(value.as_str().unwrap(), &Rfc3339).unwrap()
}

#[tokio::test]
async fn given_new_pair_when_create_should_return_active_subscription_then_conflict_on_repeat() {
    let state = memory_state();

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions",
            "42",
            Some(json!({
                "name": "Ada",
                "url": "https://a.test/hook",
                "secret": "s3cret",
                "events": ["order.created"]
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let sub = &body["subscriptions"][0];
    assert!(sub["id"].as_str().is_some());
    assert_eq!(sub["is_active"], true);
    assert_eq!(sub["owner_id"], "42");
    assert_eq!(sub["content_type"], "application/json");
    assert!(sub.get("secret").is_none());

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions",
            "42",
            Some(json!({"url": "https://a.test/hook", "events": ["order.created"]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "HOOK_SUBSCRIPTION_CONFLICT");
}

#[tokio::test]
async fn given_batch_with_known_event_when_create_should_keep_earlier_items() {
    let state = memory_state();
    create(&state, "42", "order.paid").await;

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions",
            "42",
            Some(json!({
                "url": "https://a.test/hook",
                "events": ["order.created", "order.paid", "order.shipped"]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("order.paid"));

    let (_, list) = send(&state, user_request("GET", "/subscriptions", "42", None)).await;
    let events: Vec<&str> = list["subscriptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["event"].as_str().unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert!(events.contains(&"order.created"));
    assert!(!events.contains(&"order.shipped"));
}

#[tokio::test]
async fn given_missing_identity_when_calling_subscriptions_should_return_unauthorized() {
    let state = memory_state();

    let (status, body) = send(&state, relay_request("GET", "/subscriptions", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "HOOK_IDENTITY_MISSING");
}

#[tokio::test]
async fn given_blank_events_when_create_should_return_bad_request() {
    let state = memory_state();

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions",
            "42",
            Some(json!({"url": "https://a.test/hook", "events": ["  ", ""]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "HOOK_REQUEST_MALFORMED");
}

#[tokio::test]
async fn given_unknown_owner_when_list_should_return_empty_array() {
    let state = memory_state();
    create(&state, "42", "order.created").await;

    let (status, body) = send(&state, user_request("GET", "/subscriptions", "7", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscriptions"], json!([]));
}

#[tokio::test]
async fn given_404_reported_when_get_and_reactivate_should_follow_lifecycle() {
    let state = memory_state();
    let id = create(&state, "42", "order.created").await;
    let (_, before) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}"), "42", None),
    )
    .await;

    let (status, _) = send(
        &state,
        relay_request(
            "POST",
            "/internal/relay/results",
            Some(json!({"results": [{"id": "r1", "subscription_id": id, "status_code": 404}]})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}"), "42", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscription"]["is_active"], false);
    assert_eq!(body["history"][0]["id"], "r1");
    assert_eq!(body["history"][0]["status_code"], 404);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let (status, body) = send(
        &state,
        user_request(
            "PATCH",
            &format!("/subscriptions/{id}"),
            "42",
            Some(json!({"is_active": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);
    assert!(parse_time(&body["updated_at"]) > parse_time(&before["subscription"]["updated_at"]));
}

#[tokio::test]
async fn given_same_results_twice_when_ingesting_history_should_store_once() {
    let state = memory_state();
    let id = create(&state, "42", "order.created").await;
    let payload = json!({"results": [
        {"id": "r1", "subscription_id": id, "status_code": 500, "attempted_at": "2024-05-01T10:00:00Z"},
        {"id": "r2", "subscription_id": id, "status_code": 200, "attempted_at": "2024-05-01T10:01:00Z"}
    ]});

    let (status, first) = send(
        &state,
        user_request("POST", "/subscriptions/history", "42", Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["recorded"], 2);
    let (_, second) = send(
        &state,
        user_request("POST", "/subscriptions/history", "42", Some(payload)),
    )
    .await;
    assert_eq!(second["recorded"], 0);
    assert_eq!(second["duplicates"], 2);

    let (_, history) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}/history"), "42", None),
    )
    .await;
    let ids: Vec<&str> = history["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["r2", "r1"]);

    let (_, sub) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}"), "42", None),
    )
    .await;
    assert_eq!(sub["subscription"]["is_active"], true);
}

#[tokio::test]
async fn given_zero_limit_when_search_history_should_return_single_entry() {
    let state = memory_state();
    let id = create(&state, "42", "order.created").await;
    send(
        &state,
        user_request(
            "POST",
            "/subscriptions/history",
            "42",
            Some(json!({"results": [
                {"id": "r1", "subscription_id": id, "status_code": 200},
                {"id": "r2", "subscription_id": id, "status_code": 200}
            ]})),
        ),
    )
    .await;

    let (status, body) = send(
        &state,
        user_request(
            "GET",
            &format!("/subscriptions/{id}/history?limit=0"),
            "42",
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn given_out_of_range_status_when_ingesting_should_reject_batch() {
    let state = memory_state();
    let id = create(&state, "42", "order.created").await;

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions/history",
            "42",
            Some(json!({"results": [{"id": "r1", "subscription_id": id, "status_code": 700}]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "HOOK_REQUEST_MALFORMED");
}

#[tokio::test]
async fn given_empty_batch_when_ingesting_should_succeed() {
    let state = memory_state();

    let (status, body) = send(
        &state,
        user_request(
            "POST",
            "/subscriptions/history",
            "42",
            Some(json!({"results": []})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], 0);
}

#[tokio::test]
async fn given_existing_subscription_when_delete_should_remove_it_but_keep_history() {
    let state = memory_state();
    let id = create(&state, "42", "order.created").await;
    send(
        &state,
        user_request(
            "POST",
            "/subscriptions/history",
            "42",
            Some(json!({"results": [{"id": "r1", "subscription_id": id, "status_code": 200}]})),
        ),
    )
    .await;

    let response = http::app(state.clone())
        .oneshot(user_request("DELETE", &format!("/subscriptions/{id}"), "42", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, body) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}"), "42", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "HOOK_SUBSCRIPTION_NOT_FOUND");

    let (_, history) = send(
        &state,
        user_request("GET", &format!("/subscriptions/{id}/history"), "42", None),
    )
    .await;
    assert_eq!(history["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn given_unknown_or_malformed_id_when_update_should_return_404_or_400() {
    let state = memory_state();
    let missing = uuid::Uuid::new_v4();

    let (status, _) = send(
        &state,
        user_request(
            "PATCH",
            &format!("/subscriptions/{missing}"),
            "42",
            Some(json!({"url": "https://b.test/hook"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &state,
        user_request(
            "PATCH",
            "/subscriptions/not-a-uuid",
            "42",
            Some(json!({"url": "https://b.test/hook"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_subscriptions_of_two_owners_when_search_should_span_owners() {
    let state = memory_state();
    let first = create(&state, "1", "order.created").await;
    create(&state, "2", "order.created").await;
    create(&state, "2", "order.paid").await;
    send(
        &state,
        relay_request(
            "POST",
            "/internal/relay/results",
            Some(json!({"results": [{"id": "r1", "subscription_id": first, "status_code": 410}]})),
        ),
    )
    .await;

    let (_, all) = send(
        &state,
        user_request("GET", "/subscriptions/search?event=order.created", "9", None),
    )
    .await;
    let (_, active) = send(
        &state,
        user_request(
            "GET",
            "/subscriptions/search?event=order.created&active_only=true",
            "9",
            None,
        ),
    )
    .await;
    let (_, targets) = send(
        &state,
        relay_request("GET", "/internal/relay/subscriptions?event=order.created", None),
    )
    .await;

    assert_eq!(all["subscriptions"].as_array().unwrap().len(), 2);
    assert_eq!(active["subscriptions"].as_array().unwrap().len(), 1);
    let targets = targets["targets"].as_array().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0]["url"], "https://a.test/hook");
    assert_ne!(targets[0]["subscription_id"], first.as_str());
}
