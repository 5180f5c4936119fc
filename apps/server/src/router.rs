use axum::Router;
use relay_archiver::Archiver;
use relay_kernel::server::router::with_fallbacks;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Archive Relay", description = "Resolves gallery archives to direct download URLs"))]
struct ApiDoc;

/// Assembles the public router. `docs` mounts the Scalar viewer at `/api`.
pub fn init(archiver: Archiver, docs: bool) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(relay_archiver::server::router())
        .with_state(archiver)
        .split_for_parts();

    let mut app = Router::new().merge(routes);
    if docs {
        app = app.merge(Scalar::with_url("/api", api_doc));
    }

    // Fallbacks last so wrong methods on known paths also answer 404.
    with_fallbacks(app).layer(TraceLayer::new_for_http())
}
