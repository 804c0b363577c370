//! HTTP routes for the landing page and its static assets

use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::types::{STATIC_PREFIXES, SiteLayout};

/// Build the router serving `GET /` and the three static prefixes.
///
/// Paths outside these routes fall through to axum's default 404.
pub fn site_routes(layout: &SiteLayout) -> Router {
    let mut router = Router::new().route_service("/", ServeFile::new(layout.index()));

    for (prefix, name) in STATIC_PREFIXES {
        let dir = layout.directory(name);
        tracing::debug!("Serving {} from {:?}", prefix, dir);
        router = router.nest_service(prefix, ServeDir::new(dir));
    }

    router.layer(ServiceBuilder::new().layer(CompressionLayer::new()))
}
