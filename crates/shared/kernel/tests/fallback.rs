#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use relay_kernel::server::router::with_fallbacks;
use tower::ServiceExt;

fn app() -> Router {
    with_fallbacks(Router::new().route("/resolve", post(|| async { "ok" })))
}

async fn call(method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn unknown_path_is_plain_not_found() {
    let (status, body) = call("GET", "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}

#[tokio::test]
async fn wrong_method_is_not_found_instead_of_405() {
    let (status, body) = call("GET", "/resolve").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}

#[tokio::test]
async fn matching_route_is_untouched() {
    let (status, body) = call("POST", "/resolve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
