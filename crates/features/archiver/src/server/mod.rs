//! HTTP surface of the archiver slice.

mod handlers;

use crate::Archiver;
use axum::routing::any;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::status_handler),
    tags(
        (name = "Archive", description = "Archive resolution against the target site"),
        (name = "System", description = "Relay health"),
    )
)]
struct ArchiverApi;

/// Routes of the archiver slice: `POST /resolve`, `POST /destroy` and `/status` for any method.
pub fn router() -> OpenApiRouter<Archiver> {
    OpenApiRouter::with_openapi(ArchiverApi::openapi())
        .routes(routes!(handlers::resolve_handler))
        .routes(routes!(handlers::destroy_handler))
        .route("/status", any(handlers::status_handler))
}
