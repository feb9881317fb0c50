//! HTTP surface: shared state, extractors and handlers.

pub mod actor;
pub mod catalog;
pub mod properties;

use axum::{
    Json, Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;

use crate::cache::TtlCache;
use crate::config::SearchSettings;
use crate::models::Amenity;
use crate::openapi::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: SearchSettings,
    pub amenities: Arc<TtlCache<Vec<Amenity>>>,
    /// Cities with at least one public listing.
    pub locations: Arc<TtlCache<Vec<String>>>,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: SearchSettings, cache_ttl: Duration) -> Self {
        Self {
            db,
            settings,
            amenities: Arc::new(TtlCache::new(cache_ttl)),
            locations: Arc::new(TtlCache::new(cache_ttl)),
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .route("/properties/{id}/publish", post(properties::publish_property))
        .route(
            "/properties/{id}/unpublish",
            post(properties::unpublish_property),
        )
        .route(
            "/amenities",
            get(catalog::list_amenities).post(catalog::create_amenity),
        )
        .route("/locations", get(catalog::list_locations))
        .route("/health", get(catalog::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}
