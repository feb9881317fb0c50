use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use super::AppState;
use crate::core::{Actor, catalog};
use crate::entities::AmenityCategory;
use crate::errors::ApiError;
use crate::models::{Amenity, CreateAmenity};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AmenityQuery {
    /// `interior`, `exterior` or `equipment`; unknown values are ignored.
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationQuery {
    /// Case-insensitive fragment of a city name.
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/amenities",
    tag = "catalog",
    params(AmenityQuery),
    responses((status = 200, description = "Amenity catalogue", body = [Amenity]))
)]
pub async fn list_amenities(
    State(state): State<AppState>,
    Query(params): Query<AmenityQuery>,
) -> Result<Json<Vec<Amenity>>, ApiError> {
    let all = state
        .amenities
        .get_or_load(|| catalog::load_amenities(&state.db))
        .await?;
    let category = params.category.as_deref().and_then(AmenityCategory::parse_token);
    let amenities = all
        .iter()
        .filter(|amenity| category.is_none_or(|category| amenity.category == category))
        .cloned()
        .collect();
    Ok(Json(amenities))
}

#[utoipa::path(
    post,
    path = "/amenities",
    tag = "catalog",
    request_body = CreateAmenity,
    responses(
        (status = 201, description = "Amenity created", body = Amenity),
        (status = 403, description = "Neither admin nor holder of manage_amenities"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_amenity(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateAmenity>,
) -> Result<(StatusCode, Json<Amenity>), ApiError> {
    let created = catalog::create_amenity(&state.db, &actor, payload).await?;
    state.amenities.invalidate().await;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/locations",
    tag = "catalog",
    params(LocationQuery),
    responses((status = 200, description = "Matching cities, alphabetical, at most 10", body = [String]))
)]
pub async fn list_locations(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let cities = state
        .locations
        .get_or_load(|| catalog::load_public_cities(&state.db))
        .await?;
    Ok(Json(catalog::suggest_locations(&cities, params.q.as_deref())))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database reachable"),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.db.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
