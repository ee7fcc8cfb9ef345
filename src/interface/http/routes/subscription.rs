// HTTP routes: subscription lifecycle and delivery history.

use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::application::usecases::create_subscriptions::{
    CreateSubscriptionsCommand, CreateSubscriptionsUseCase,
};
use crate::application::usecases::delete_subscription::{
    DeleteSubscriptionCommand, DeleteSubscriptionUseCase,
};
use crate::application::usecases::get_subscription::GetSubscriptionUseCase;
use crate::application::usecases::ingest_delivery_results::IngestDeliveryResultsUseCase;
use crate::application::usecases::list_subscriptions::ListSubscriptionsUseCase;
use crate::application::usecases::search_subscriptions::SearchSubscriptionsUseCase;
use crate::application::usecases::update_subscription::{
    UpdateSubscriptionCommand, UpdateSubscriptionUseCase,
};
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::entities::subscription::SubscriptionConfig;
use crate::domain::value_objects::ids::{OwnerId, SubscriptionId};
use crate::interface::http::dto::subscription::{
    CreateSubscriptionsRequest, DEFAULT_CONTENT_TYPE, DeliveryResultRequest,
    DeliveryResultResponse, HistoryQuery, HistoryResponse, IngestResultsRequest,
    IngestResultsResponse, SearchQuery, SubscriptionDetailResponse, SubscriptionListResponse,
    SubscriptionResponse, UpdateSubscriptionRequest, normalize_events,
};
use crate::interface::http::identity::identity_middleware;
use crate::interface::http::problem::{
    HOOK_SUBSCRIPTION_CONFLICT, from_use_case_error, malformed, problem,
};
use crate::interface::http::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, middleware};

/// Builds subscription routes. Every route requires a caller identity.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/subscriptions", post(create_subscriptions).get(list_subscriptions))
        .route("/subscriptions/search", get(search_subscriptions))
        .route("/subscriptions/history", post(ingest_history))
        .route(
            "/subscriptions/:subscription_id",
            get(get_subscription)
                .patch(update_subscription)
                .delete(delete_subscription),
        )
        .route("/subscriptions/:subscription_id/history", get(search_history))
        .route_layer(middleware::from_fn(identity_middleware))
}

/// Creates one subscription per requested event.
async fn create_subscriptions(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(payload): Json<CreateSubscriptionsRequest>,
) -> Response {
    // Step 1: Validate payload basics.
    let url = payload.url.trim();
    if url.is_empty() {
        return malformed("url is required");
    }
    let events = normalize_events(&payload.events);
    if events.is_empty() {
        return malformed("events list is required");
    }

    // Step 2: Execute the use case.
    let result = CreateSubscriptionsUseCase::execute(
        &state.ctx,
        CreateSubscriptionsCommand {
            actor_name: payload
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| owner.to_string()),
            owner_id: owner,
            config: SubscriptionConfig {
                url: url.to_string(),
                secret: payload.secret.unwrap_or_default(),
                content_type: payload
                    .content_type
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            },
            events,
        },
    )
    .await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(created) => (
            StatusCode::CREATED,
            Json(SubscriptionListResponse::from_subscriptions(&created)),
        )
            .into_response(),
        Err(SubscriptionUseCaseError::Conflict { event, created }) => {
            let committed: Vec<String> = created.iter().map(|s| s.id.to_string()).collect();
            let detail = if committed.is_empty() {
                format!("a subscription for event '{event}' already exists")
            } else {
                format!(
                    "a subscription for event '{event}' already exists; created before the conflict: {}",
                    committed.join(", ")
                )
            };
            problem(
                StatusCode::CONFLICT,
                HOOK_SUBSCRIPTION_CONFLICT,
                Some(detail),
                None,
            )
        }
        Err(err) => from_use_case_error(&err),
    }
}

/// Lists the caller's subscriptions.
async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> Response {
    match ListSubscriptionsUseCase::execute(&state.ctx, &owner).await {
        Ok(subs) => Json(SubscriptionListResponse::from_subscriptions(&subs)).into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Owner-agnostic lookup by event name.
async fn search_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let event = query.event.trim();
    if event.is_empty() {
        return malformed("event is required");
    }
    match SearchSubscriptionsUseCase::by_event(&state.ctx, event, query.active_only).await {
        Ok(subs) => Json(SubscriptionListResponse::from_subscriptions(&subs)).into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Fetches one subscription with its most recent history.
async fn get_subscription(
    State(state): State<AppState>,
    Path(subscription_id): Path<String>,
) -> Response {
    let id = match parse_subscription_id(&subscription_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match GetSubscriptionUseCase::execute(&state.ctx, id).await {
        Ok(out) => Json(SubscriptionDetailResponse {
            subscription: SubscriptionResponse::from(&out.subscription),
            history: out.history.iter().map(DeliveryResultResponse::from).collect(),
        })
        .into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Applies a partial update.
async fn update_subscription(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(subscription_id): Path<String>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Response {
    let id = match parse_subscription_id(&subscription_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let result = UpdateSubscriptionUseCase::execute(
        &state.ctx,
        UpdateSubscriptionCommand {
            subscription_id: id,
            actor: owner,
            patch: payload.into(),
        },
    )
    .await;
    match result {
        Ok(sub) => Json(SubscriptionResponse::from(&sub)).into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Deletes a subscription. History is kept.
async fn delete_subscription(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(subscription_id): Path<String>,
) -> Response {
    let id = match parse_subscription_id(&subscription_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let result = DeleteSubscriptionUseCase::execute(
        &state.ctx,
        DeleteSubscriptionCommand {
            subscription_id: id,
            actor: owner,
        },
    )
    .await;
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Most recent delivery results, newest first.
async fn search_history(
    State(state): State<AppState>,
    Path(subscription_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let id = match parse_subscription_id(&subscription_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let limit = query.limit.unwrap_or(state.ctx.limits.history_limit);
    match SearchSubscriptionsUseCase::history(&state.ctx, id, limit).await {
        Ok(history) => Json(HistoryResponse {
            history: history.iter().map(DeliveryResultResponse::from).collect(),
        })
        .into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

/// Bulk history update; feeds the reconciler.
async fn ingest_history(
    State(state): State<AppState>,
    Json(payload): Json<IngestResultsRequest>,
) -> Response {
    let results = match convert_results(payload.results) {
        Ok(results) => results,
        Err(response) => return response,
    };
    match IngestDeliveryResultsUseCase::execute(&state.ctx, results).await {
        Ok(report) => Json(IngestResultsResponse::from(report)).into_response(),
        Err(err) => from_use_case_error(&err),
    }
}

pub(crate) fn convert_results(
    results: Vec<DeliveryResultRequest>,
) -> Result<Vec<DeliveryResult>, Response> {
    results
        .into_iter()
        .map(|r| r.into_result().map_err(malformed))
        .collect()
}

fn parse_subscription_id(raw: &str) -> Result<SubscriptionId, Response> {
    uuid::Uuid::parse_str(raw)
        .map(SubscriptionId)
        .map_err(|_| malformed("invalid subscription_id"))
}
