use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// RFC 7807 Problem Details payload.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub r#type: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies this specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// A stable, machine-readable application error code (HOOK_...).
    pub code: String,
}

/// Build a Problem Details response with the correct content-type.
pub fn problem(
    status: StatusCode,
    code: &str,
    detail: Option<String>,
    instance: Option<String>,
) -> Response {
    // Step 1: Build the problem payload.
    let payload = ProblemDetails {
        r#type: "about:blank".to_string(),
        title: status.canonical_reason().unwrap_or("Error").to_string(),
        status: status.as_u16(),
        detail,
        instance,
        code: code.to_string(),
    };

    // Step 2: Convert to an HTTP response with JSON body.
    let mut response = (status, Json(payload)).into_response();

    // Step 3: Ensure RFC 7807 content type.
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/problem+json"),
    );

    response
}

/// Shorthand for a 400 with `HOOK_REQUEST_MALFORMED`.
pub fn malformed(detail: impl Into<String>) -> Response {
    problem(
        StatusCode::BAD_REQUEST,
        HOOK_REQUEST_MALFORMED,
        Some(detail.into()),
        None,
    )
}

/// Map a use case failure to its problem response.
pub fn from_use_case_error(err: &SubscriptionUseCaseError) -> Response {
    match err {
        SubscriptionUseCaseError::NotFound(id) => problem(
            StatusCode::NOT_FOUND,
            HOOK_SUBSCRIPTION_NOT_FOUND,
            Some(format!("subscription {id} not found")),
            None,
        ),
        SubscriptionUseCaseError::Conflict { event, .. } => problem(
            StatusCode::CONFLICT,
            HOOK_SUBSCRIPTION_CONFLICT,
            Some(format!("a subscription for event '{event}' already exists")),
            None,
        ),
        SubscriptionUseCaseError::SubscriptionStorage(_)
        | SubscriptionUseCaseError::HistoryStorage(_) => {
            error!(error = %err, "storage_failure");
            problem(
                StatusCode::SERVICE_UNAVAILABLE,
                HOOK_STORAGE_ERROR,
                Some("storage unavailable".to_string()),
                None,
            )
        }
    }
}

pub const HOOK_REQUEST_MALFORMED: &str = "HOOK_REQUEST_MALFORMED";
pub const HOOK_IDENTITY_MISSING: &str = "HOOK_IDENTITY_MISSING";
pub const HOOK_SUBSCRIPTION_NOT_FOUND: &str = "HOOK_SUBSCRIPTION_NOT_FOUND";
pub const HOOK_SUBSCRIPTION_CONFLICT: &str = "HOOK_SUBSCRIPTION_CONFLICT";
pub const HOOK_STORAGE_ERROR: &str = "HOOK_STORAGE_ERROR";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ids::SubscriptionId;
    use crate::infrastructure::db::stores::subscription_store::SubscriptionRepositoryError;

    #[test]
    fn given_conflict_when_mapped_should_return_409_problem() {
        let err = SubscriptionUseCaseError::Conflict {
            event: "order.created".to_string(),
            created: Vec::new(),
        };

        let response = from_use_case_error(&err);

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn given_not_found_and_storage_errors_when_mapped_should_return_404_and_503() {
        let not_found = from_use_case_error(&SubscriptionUseCaseError::NotFound(
            SubscriptionId::new(),
        ));
        let storage = from_use_case_error(&SubscriptionUseCaseError::SubscriptionStorage(
            SubscriptionRepositoryError::StorageUnavailable,
        ));

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(storage.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
