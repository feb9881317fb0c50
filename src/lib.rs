//! # immocrate
//!
//! Real-estate listing API on Axum and Sea-ORM: faceted property search
//! with pagination, and an owner-scoped listing lifecycle.
//!
//! ```rust,ignore
//! use immocrate::{ServerConfig, create_app, migration::Migrator};
//! use sea_orm_migration::MigratorTrait;
//!
//! let config = ServerConfig::default();
//! let db = sea_orm::Database::connect(&config.database_url).await?;
//! Migrator::up(&db, None).await?;
//! let app = create_app(db, &config);
//! ```

pub mod cache;
pub mod config;
pub mod core;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod validation;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{SearchSettings, ServerConfig};
pub use errors::ApiError;
pub use routes::AppState;

/// Build the application router with its middleware stack.
pub fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Router {
    let state = AppState::new(db, config.search_settings(), config.cache_ttl());
    let router = routes::router(state);

    let router = if config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("immocrate={level},tower_http=debug")));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
