//! Server configuration
//!
//! Configuration is loaded from environment variables. Only `PORT` is read;
//! the bind host and site root are fixed defaults.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Main server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Root directory holding `index.html`, `assets/`, `css/` and `javascript/`
    pub site_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            site_dir: PathBuf::from("site"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT")
            && !port.is_empty()
        {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(e) => warn!(
                    "Ignoring invalid PORT {:?} ({}), using {}",
                    port, e, config.port
                ),
            }
        }

        config
    }
}
