use crate::domain::value_objects::ids::OwnerId;
use crate::interface::http::problem::{HOOK_IDENTITY_MISSING, problem};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Header carrying the caller id, set by the gateway in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the caller from `x-user-id` and stores it as an `OwnerId` request extension.
pub async fn identity_middleware(mut req: Request<Body>, next: Next) -> Result<Response, Response> {
    let owner = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(OwnerId::from);

    let Some(owner) = owner else {
        return Err(problem(
            StatusCode::UNAUTHORIZED,
            HOOK_IDENTITY_MISSING,
            Some(format!("missing {USER_ID_HEADER} header")),
            Some(req.uri().path().to_string()),
        ));
    };

    req.extensions_mut().insert(owner);
    Ok(next.run(req).await)
}
