//! Server configuration from the environment

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`)
    Any,

    /// An explicit list of origins
    List(Vec<String>),

    /// Localhost origins used during development
    Development,
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the persisted lists and settings
    pub data_path: PathBuf,

    /// JSON catalog to seed the book source with
    pub catalog: Option<PathBuf>,

    /// Listen address
    pub bind: SocketAddr,

    pub cors_origins: CorsOrigins,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./libris_data"),
            catalog: None,
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: CorsOrigins::Development,
        }
    }
}

impl ServerConfig {
    /// Read `LIBRIS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("LIBRIS_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }

        config.catalog = lookup("LIBRIS_CATALOG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(bind) = lookup("LIBRIS_BIND") {
            config.bind = bind
                .parse()
                .with_context(|| format!("LIBRIS_BIND is not a socket address: {}", bind))?;
        }

        // LIBRIS_CORS_ORIGINS can be comma-separated list of origins, or "*" for any
        config.cors_origins = match lookup("LIBRIS_CORS_ORIGINS") {
            Some(origins) if origins.trim() == "*" => CorsOrigins::Any,
            Some(origins) => CorsOrigins::List(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            None => CorsOrigins::Development,
        };

        Ok(config)
    }
}
