//! Site layout and error definitions

use std::path::PathBuf;
use thiserror::Error;

/// Problems found in the site directory at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    #[error("Site directory not found: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("Landing page not found: {0:?}")]
    MissingIndex(PathBuf),
}

/// Static prefixes and the subdirectory each one maps to
pub const STATIC_PREFIXES: [(&str, &str); 3] = [
    ("/assets", "assets"),
    ("/css", "css"),
    ("/javascript", "javascript"),
];

/// Resolved locations of everything the landing page serves
#[derive(Debug, Clone)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The document served for `GET /`
    pub fn index(&self) -> PathBuf {
        self.root.join("index.html")
    }

    /// Directory served under `prefix`'s subdirectory name
    pub fn directory(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Report every missing piece of the layout.
    ///
    /// An empty result means all routes have something to serve.
    pub fn check(&self) -> Vec<SiteError> {
        let mut problems = Vec::new();

        if !self.root.is_dir() {
            problems.push(SiteError::MissingDirectory(self.root.clone()));
            return problems;
        }

        let index = self.index();
        if !index.is_file() {
            problems.push(SiteError::MissingIndex(index));
        }

        for (_, name) in STATIC_PREFIXES {
            let dir = self.directory(name);
            if !dir.is_dir() {
                problems.push(SiteError::MissingDirectory(dir));
            }
        }

        problems
    }
}
