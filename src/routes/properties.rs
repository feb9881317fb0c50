use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use super::AppState;
use crate::core::{Actor, listings, search_properties};
use crate::errors::ApiError;
use crate::filtering::{Page, RawQuery, SearchQuery, calculate_content_range, normalize, validate_query};
use crate::models::{
    CreateProperty, DeletedResponse, Property, PropertyDetail, PropertySummary, UpdateProperty,
};

const RESOURCE_NAME_PLURAL: &str = "properties";

/// Search publicly visible listings.
///
/// Unparseable parameters are ignored unless the server runs in strict
/// mode, where they are reported with a 422.
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matching listings", body = Page<PropertySummary>),
        (status = 401, description = "Malformed identity header"),
        (status = 422, description = "Invalid search parameter (strict mode)"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    actor: Option<Actor>,
    Query(raw): Query<RawQuery>,
) -> Result<(HeaderMap, Json<Page<PropertySummary>>), ApiError> {
    let query = if state.settings.strict {
        validate_query(&raw, &state.settings)?
    } else {
        normalize(&raw, &state.settings)
    };
    let offset = query.page.offset();

    let page = search_properties(&state.db, query, actor.as_ref()).await?;
    let ids: Vec<Uuid> = page.items.iter().map(|model| model.id).collect();
    let mut covers = listings::cover_images(&state.db, &ids).await?;
    let page = page.map(|model| {
        let cover = covers.remove(&model.id);
        PropertySummary::from_model(model, cover)
    });

    let headers = calculate_content_range(
        RESOURCE_NAME_PLURAL,
        offset,
        page.items.len(),
        page.pagination.total,
    );
    Ok((headers, Json(page)))
}

#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing with images and amenities", body = PropertyDetail),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    actor: Option<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyDetail>, ApiError> {
    listings::get_listing(&state.db, id, actor.as_ref()).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Draft listing created", body = Property),
        (status = 401, description = "Unknown caller"),
        (status = 403, description = "Account or agency locked"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateProperty>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let created = listings::create_listing(&state.db, &actor, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Listing updated", body = Property),
        (status = 404, description = "Listing not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_property(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProperty>,
) -> Result<Json<Property>, ApiError> {
    let updated = listings::update_listing(&state.db, &actor, id, payload).await?;
    state.locations.invalidate().await;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing deleted", body = DeletedResponse),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn delete_property(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = listings::delete_listing(&state.db, &actor, id).await?;
    state.locations.invalidate().await;
    Ok(Json(DeletedResponse { id }))
}

#[utoipa::path(
    post,
    path = "/properties/{id}/publish",
    tag = "properties",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing published", body = Property),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Listing is not a draft")
    )
)]
pub async fn publish_property(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, ApiError> {
    let published = listings::publish_listing(&state.db, &actor, id).await?;
    state.locations.invalidate().await;
    Ok(Json(published))
}

#[utoipa::path(
    post,
    path = "/properties/{id}/unpublish",
    tag = "properties",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing back to draft", body = Property),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Listing is not published")
    )
)]
pub async fn unpublish_property(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, ApiError> {
    let unpublished = listings::unpublish_listing(&state.db, &actor, id).await?;
    state.locations.invalidate().await;
    Ok(Json(unpublished))
}
