use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use relay_domain::constants::NOT_FOUND;
use serde::Serialize;

/// Headers for responses that reflect live upstream state and must never be cached.
pub const NO_STORE: [(header::HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (header::PRAGMA, "no-cache"),
];

/// Wraps a JSON body with [`NO_STORE`] headers.
pub fn no_store_json<T: Serialize>(body: T) -> Response {
    (NO_STORE, Json(body)).into_response()
}

/// Plain-text 404 used for unknown paths and for known paths hit with the wrong method.
#[allow(clippy::unused_async)]
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND)
}
