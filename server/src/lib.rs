//! Landing Page Server Library
//!
//! This module exports the server components and the carousel controller
//! for use in integration tests and external tooling.

pub mod carousel;
pub mod config;
pub mod nav;
pub mod site;

use axum::Router;
use tower_http::trace::TraceLayer;

// Re-export commonly used types
pub use carousel::{Carousel, CarouselEvent, CarouselHandle};
pub use config::Config;
pub use site::{SiteError, SiteLayout, site_routes};

/// Build the full application router for `config`
pub fn build_router(config: &Config) -> Router {
    let layout = SiteLayout::new(&config.site_dir);
    site_routes(&layout).layer(TraceLayer::new_for_http())
}
