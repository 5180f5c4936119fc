use crate::Archiver;
use crate::models::{DestroyReply, DestroyRequest, ResolveReply, ResolveRequest, StatusReply};
use axum::extract::State;
use axum::response::Response;
use axum::body::Bytes;
use relay_domain::constants::{ARCHIVE_TAG, SYSTEM_TAG};
use relay_kernel::server::response::no_store_json;

// Bodies are taken raw: a malformed body is a reply, not an extractor rejection.

#[utoipa::path(
    post,
    path = "/resolve",
    request_body = ResolveRequest,
    responses((status = OK, description = "Resolution outcome, errors are reported in `msg`", body = ResolveReply)),
    tag = ARCHIVE_TAG,
)]
pub(super) async fn resolve_handler(State(archiver): State<Archiver>, body: Bytes) -> Response {
    no_store_json(archiver.resolve(&body).await)
}

#[utoipa::path(
    post,
    path = "/destroy",
    request_body = DestroyRequest,
    responses((status = OK, description = "Session invalidation result", body = DestroyReply)),
    tag = ARCHIVE_TAG,
)]
pub(super) async fn destroy_handler(State(archiver): State<Archiver>, body: Bytes) -> Response {
    no_store_json(archiver.destroy(&body).await)
}

/// Accepts any method.
#[utoipa::path(
    get,
    path = "/status",
    responses((status = OK, description = "Live probe of the canary gallery", body = StatusReply)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn status_handler(State(archiver): State<Archiver>) -> Response {
    no_store_json(StatusReply { status: archiver.status().await })
}
