//! Amenity catalogue and city suggestions. Both are read far more often
//! than they change, and are served through the caches in `AppState`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::Actor;
use crate::entities::user::{self, UserRights, UserStatus};
use crate::entities::{PropertyStatus, amenity, property};
use crate::errors::ApiError;
use crate::models::{Amenity, CreateAmenity};
use crate::validation::Validatable;

pub const MAX_SUGGESTIONS: usize = 10;

/// Whole catalogue, ordered by name.
///
/// # Errors
///
/// Propagates store failures.
pub async fn load_amenities<C: ConnectionTrait>(conn: &C) -> Result<Vec<Amenity>, DbErr> {
    let rows = amenity::Entity::find()
        .order_by_asc(amenity::Column::Name)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Amenity::from).collect())
}

/// Whether the stored account behind `actor` is active and holds `right`.
async fn holds_right<C: ConnectionTrait>(conn: &C, actor: &Actor, right: &str) -> Result<bool, DbErr> {
    let account = user::Entity::find_by_id(actor.user_id).one(conn).await?;
    Ok(account.is_some_and(|account| account.status != UserStatus::Locked && account.rights.grants(right)))
}

/// # Errors
///
/// - `Forbidden` unless `actor` is an admin or holds `manage_amenities`
/// - `ValidationFailed` for an empty name
/// - `Conflict` when the name is taken
pub async fn create_amenity<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    payload: CreateAmenity,
) -> Result<Amenity, ApiError> {
    if !actor.is_admin && !holds_right(conn, actor, UserRights::MANAGE_AMENITIES).await? {
        return Err(ApiError::forbidden("Only administrators can manage amenities"));
    }
    payload.validate()?;

    let model = amenity::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        category: Set(payload.category),
    }
    .insert(conn)
    .await?;

    tracing::info!(amenity_id = %model.id, name = %model.name, "amenity created");
    Ok(Amenity::from(model))
}

/// Distinct cities that currently have a publicly visible listing, sorted.
///
/// # Errors
///
/// Propagates store failures.
pub async fn load_public_cities<C: ConnectionTrait>(conn: &C) -> Result<Vec<String>, DbErr> {
    let mut cities: Vec<String> = property::Entity::find()
        .select_only()
        .column(property::Column::City)
        .distinct()
        .filter(property::Column::Status.is_in(PropertyStatus::PUBLIC))
        .into_tuple()
        .all(conn)
        .await?;
    cities.sort_unstable_by_key(|city| city.to_lowercase());
    cities.dedup_by_key(|city| city.to_lowercase());
    Ok(cities)
}

/// Up to [`MAX_SUGGESTIONS`] cities containing `q` (case-insensitive).
#[must_use]
pub fn suggest_locations(cities: &[String], q: Option<&str>) -> Vec<String> {
    let needle = q.map(str::trim).filter(|q| !q.is_empty()).map(str::to_lowercase);
    cities
        .iter()
        .filter(|city| {
            needle
                .as_deref()
                .is_none_or(|needle| city.to_lowercase().contains(needle))
        })
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
