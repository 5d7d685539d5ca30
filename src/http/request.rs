//! Request identity middleware.
//!
//! # Responsibilities
//! - Ensure every request carries an `x-request-id` (UUID v4)
//! - Preserve IDs supplied by the caller
//! - Echo the ID on the response so clients can correlate

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware ensuring a request ID is present on the request and echoed on
/// the response.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(existing) => existing.clone(),
        None => {
            // Hyphenated UUIDs are always valid header values.
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        }
    };

    request.headers_mut().insert(REQUEST_ID_HEADER, id.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, id);
    response
}
