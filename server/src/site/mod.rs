//! Static delivery of the landing page
//!
//! This module provides:
//! - `SiteLayout` for locating the page and its asset directories
//! - HTTP routes mapping `/`, `/assets`, `/css` and `/javascript` onto them

pub mod routes;
mod types;

pub use routes::site_routes;
pub use types::{STATIC_PREFIXES, SiteError, SiteLayout};
