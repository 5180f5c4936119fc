use super::response::not_found;
use axum::Router;

/// Applies the shared 404 handling to a fully assembled router.
///
/// Must be called after every route has been merged: the method fallback only reaches
/// routes that already exist.
pub fn with_fallbacks<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.fallback(not_found).method_not_allowed_fallback(not_found)
}
