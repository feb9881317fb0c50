//! Server configuration.
//!
//! Every flag can also be supplied through the environment:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `IMMO_HOST` | 127.0.0.1 | Host to bind |
//! | `IMMO_PORT` | 3000 | Port to listen on |
//! | `DATABASE_URL` | sqlite::memory: | sea-orm connection string |
//! | `IMMO_LOG_LEVEL` | info | Log level when `RUST_LOG` is unset |
//! | `IMMO_DEFAULT_PAGE_SIZE` | 20 | Search page size when `limit` is absent |
//! | `IMMO_MAX_PAGE_SIZE` | 100 | Upper bound for `limit` |
//! | `IMMO_STRICT_SEARCH` | false | Reject malformed search parameters with 422 |
//! | `IMMO_CACHE_TTL` | 300 | Amenity / location cache lifetime (seconds) |
//! | `IMMO_ENABLE_CORS` | true | Permissive CORS layer |

use clap::{ArgAction, Parser};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "immocrate")]
#[command(about = "Real-estate listing API server")]
pub struct ServerConfig {
    /// Host address to bind to.
    #[arg(long, env = "IMMO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "IMMO_PORT", default_value = "3000")]
    pub port: u16,

    /// Database connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "IMMO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "IMMO_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: u64,

    #[arg(long, env = "IMMO_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u64,

    /// Reject search parameters that do not parse instead of ignoring them.
    #[arg(long, env = "IMMO_STRICT_SEARCH", default_value = "false", action = ArgAction::Set)]
    pub strict_search: bool,

    /// Lifetime of the amenity and location caches, in seconds.
    #[arg(long, env = "IMMO_CACHE_TTL", default_value = "300")]
    pub cache_ttl_secs: u64,

    #[arg(long, env = "IMMO_ENABLE_CORS", default_value = "true", action = ArgAction::Set)]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite::memory:".to_string(),
            log_level: "info".to_string(),
            default_page_size: 20,
            max_page_size: 100,
            strict_search: false,
            cache_ttl_secs: 300,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Search knobs, with page sizes forced into a usable shape
    /// (`1 <= default <= max`).
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        let max_page_size = self.max_page_size.max(1);
        SearchSettings {
            default_page_size: self.default_page_size.clamp(1, max_page_size),
            max_page_size,
            strict: self.strict_search,
        }
    }
}

/// The subset of configuration the search path needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub default_page_size: u64,
    pub max_page_size: u64,
    /// Strict mode: malformed parameters produce a 422 instead of being dropped.
    pub strict: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = ServerConfig::parse_from(["immocrate"]);
        let default = ServerConfig::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.default_page_size, 20);
        assert_eq!(parsed.max_page_size, 100);
        assert!(!parsed.strict_search);
        assert!(parsed.enable_cors);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "immocrate",
            "--port",
            "8081",
            "--strict-search",
            "true",
            "--max-page-size",
            "50",
        ]);
        assert_eq!(config.port, 8081);
        assert!(config.search_settings().strict);
        assert_eq!(config.search_settings().max_page_size, 50);
    }

    #[test]
    fn test_search_settings_are_sanitized() {
        let config = ServerConfig {
            default_page_size: 500,
            max_page_size: 0,
            ..Default::default()
        };
        let settings = config.search_settings();
        assert_eq!(settings.max_page_size, 1);
        assert_eq!(settings.default_page_size, 1);
    }
}
