//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use landing_server::carousel::{Carousel, CarouselView, SlideOffset, TimerQueue};
use landing_server::{Config, build_router};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// The site directory shipped with the repository
pub fn bundled_site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../site")
}

/// Create a test application router serving `site_dir`
pub fn create_test_app_for(site_dir: PathBuf) -> Router {
    let config = Config {
        site_dir,
        ..Config::default()
    };
    build_router(&config)
}

/// Create a test application router serving the bundled site
pub fn create_test_app() -> Router {
    create_test_app_for(bundled_site_dir())
}

/// Response parts collected for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// GET `uri` from the router
pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

/// Carousel view that can be moved onto the driver task and inspected later
#[derive(Clone, Default)]
pub struct SharedView {
    frames: Arc<Mutex<Vec<SlideOffset>>>,
    active_dot: Arc<Mutex<Option<usize>>>,
}

impl SharedView {
    pub fn frames(&self) -> Vec<SlideOffset> {
        self.frames.lock().unwrap().clone()
    }

    pub fn transforms(&self) -> Vec<String> {
        self.frames().iter().map(SlideOffset::css_transform).collect()
    }

    pub fn active_dot(&self) -> Option<usize> {
        *self.active_dot.lock().unwrap()
    }
}

impl CarouselView for SharedView {
    fn translate(&mut self, offset: SlideOffset) {
        self.frames.lock().unwrap().push(offset);
    }

    fn highlight_dot(&mut self, index: usize) {
        *self.active_dot.lock().unwrap() = Some(index);
    }
}

/// Create a carousel over `slides` slides backed by a fresh timer queue
pub fn create_test_carousel(slides: usize, view: SharedView) -> Carousel<SharedView, TimerQueue> {
    Carousel::new(slides, view, TimerQueue::new()).unwrap()
}

/// Initialize test logging for detailed output
pub fn init_test_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landing_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
