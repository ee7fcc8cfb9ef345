use axum::http::{HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use tracing::{Instrument, info, info_span};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlates log lines of one request; echoed back in `x-request-id`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Reuses the caller's `x-request-id` or mints one, and runs the request inside a span.
pub async fn request_id_middleware(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let request_id = RequestId(request_id);
    req.extensions_mut().insert(request_id.clone());

    let span = info_span!("request", request_id = %request_id.0);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Structured access log plus request counters.
pub async fn request_log_middleware(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let method_label = method_label(&method);
    let status_label = status_class(status);
    counter!("http_requests_total", "method" => method_label, "status" => status_label)
        .increment(1);
    histogram!(
        "http_request_duration_ms",
        "method" => method_label,
        "status" => status_label
    )
    .record(latency_ms as f64);
    info!(method = %method, path = %path, status, latency_ms, "http_request");

    response
}

fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PATCH" => "PATCH",
        "DELETE" => "DELETE",
        _ => "OTHER",
    }
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
