//! Owner-scoped listing lifecycle.
//!
//! Every mutation reloads the listing inside its own transaction and checks
//! ownership right before writing. A listing owned by someone else is
//! reported exactly like a missing one.

use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::{Actor, reference};
use crate::entities::{
    PropertyStatus, agency, amenity, property, property_amenity, property_image, user,
};
use crate::errors::ApiError;
use crate::models::{
    AmenityLink, CreateProperty, OwnerContact, Property, PropertyAmenityView, PropertyDetail,
    PropertyImage, UpdateProperty,
};
use crate::validation::{Validatable, ValidationErrors};

const RESOURCE: &str = "Property";

fn not_found(id: Uuid) -> ApiError {
    ApiError::not_found(RESOURCE, Some(id.to_string()))
}

async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    actor: &Actor,
) -> Result<property::Model, ApiError> {
    let model = property::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| not_found(id))?;
    if !actor.owns(model.owner_id) {
        tracing::debug!(property_id = %id, actor = %actor.user_id, "ownership check failed");
        return Err(not_found(id));
    }
    Ok(model)
}

/// Batch-load images (in display order) and amenities for one listing.
async fn load_detail<C: ConnectionTrait>(
    conn: &C,
    model: property::Model,
) -> Result<PropertyDetail, ApiError> {
    let images = property_image::Entity::find()
        .filter(property_image::Column::PropertyId.eq(model.id))
        .order_by_asc(property_image::Column::Position)
        .all(conn)
        .await?;

    let links = property_amenity::Entity::find()
        .filter(property_amenity::Column::PropertyId.eq(model.id))
        .all(conn)
        .await?;
    let by_amenity: HashMap<Uuid, &property_amenity::Model> =
        links.iter().map(|link| (link.amenity_id, link)).collect();

    let amenities = if links.is_empty() {
        Vec::new()
    } else {
        amenity::Entity::find()
            .filter(amenity::Column::Id.is_in(by_amenity.keys().copied()))
            .order_by_asc(amenity::Column::Name)
            .all(conn)
            .await?
    };

    let contact = user::Entity::find_by_id(model.owner_id)
        .one(conn)
        .await?
        .map(OwnerContact::from);

    Ok(PropertyDetail {
        property: Property::from(model),
        images: images.into_iter().map(PropertyImage::from).collect(),
        amenities: amenities
            .into_iter()
            .filter_map(|amenity| {
                let link = *by_amenity.get(&amenity.id)?;
                Some(PropertyAmenityView::new(amenity, link))
            })
            .collect(),
        contact,
    })
}

async fn replace_images<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
    urls: &[String],
) -> Result<(), ApiError> {
    property_image::Entity::delete_many()
        .filter(property_image::Column::PropertyId.eq(property_id))
        .exec(conn)
        .await?;
    if urls.is_empty() {
        return Ok(());
    }
    let rows = urls.iter().zip(0..).map(|(url, position)| property_image::ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property_id),
        url: Set(url.trim().to_string()),
        position: Set(position),
    });
    property_image::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

async fn replace_amenities<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
    links: &[AmenityLink],
) -> Result<(), ApiError> {
    property_amenity::Entity::delete_many()
        .filter(property_amenity::Column::PropertyId.eq(property_id))
        .exec(conn)
        .await?;
    if links.is_empty() {
        return Ok(());
    }
    let rows = links.iter().map(|link| property_amenity::ActiveModel {
        property_id: Set(property_id),
        amenity_id: Set(link.amenity_id),
        area: Set(link.area),
        count: Set(link.count),
    });
    property_amenity::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Unknown amenity ids are a payload error, not a foreign-key failure.
async fn ensure_amenities_exist<C: ConnectionTrait>(
    conn: &C,
    links: &[AmenityLink],
) -> Result<(), ApiError> {
    if links.is_empty() {
        return Ok(());
    }
    let found = amenity::Entity::find()
        .filter(amenity::Column::Id.is_in(links.iter().map(|link| link.amenity_id)))
        .count(conn)
        .await?;
    if found != links.len() as u64 {
        let mut errors = ValidationErrors::new();
        errors.push("amenities", "Unknown amenity");
        return Err(errors.into());
    }
    Ok(())
}

/// Read one listing.
///
/// Drafts and disabled listings are only visible to their owner and to
/// admins. Any read by someone other than the owner counts as a view.
///
/// # Errors
///
/// `NotFound` when the listing does not exist or is hidden from the caller.
pub async fn get_listing(
    db: &DatabaseConnection,
    id: Uuid,
    actor: Option<&Actor>,
) -> Result<PropertyDetail, ApiError> {
    let model = property::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))?;

    let is_owner = actor.is_some_and(|actor| actor.owns(model.owner_id));
    let is_admin = actor.is_some_and(|actor| actor.is_admin);
    if !model.status.is_public() && !is_owner && !is_admin {
        return Err(not_found(id));
    }

    let model = if is_owner {
        model
    } else {
        property::Entity::update_many()
            .col_expr(
                property::Column::Views,
                Expr::col(property::Column::Views).add(1),
            )
            .filter(property::Column::Id.eq(id))
            .exec(db)
            .await?;
        property::Model {
            views: model.views + 1,
            ..model
        }
    };

    load_detail(db, model).await
}

/// Create a draft listing owned by `actor`.
///
/// # Errors
///
/// - `ValidationFailed` for an invalid payload or unknown amenity
/// - `Unauthorized` when the actor is not a known user
/// - `Forbidden` when the user or their agency is locked
pub async fn create_listing(
    db: &DatabaseConnection,
    actor: &Actor,
    payload: CreateProperty,
) -> Result<Property, ApiError> {
    payload.validate()?;

    let owner = user::Entity::find_by_id(actor.user_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;
    if owner.status == user::UserStatus::Locked {
        return Err(ApiError::forbidden("Account is locked"));
    }
    if let Some(agency_id) = owner.agency_id {
        let agency = agency::Entity::find_by_id(agency_id).one(db).await?;
        if agency.is_some_and(|agency| agency.status == agency::AgencyStatus::Locked) {
            return Err(ApiError::forbidden("Agency is locked"));
        }
    }

    let CreateProperty {
        title,
        description,
        price,
        area,
        land_area,
        rooms,
        bedrooms,
        bathrooms,
        property_type,
        transaction_type,
        location,
        address,
        city,
        postal_code,
        available_from,
        images,
        amenities,
    } = payload;

    let id = Uuid::new_v4();
    let now = Utc::now();
    let txn = db.begin().await?;
    let candidates = std::iter::once(id).chain(std::iter::repeat_with(Uuid::new_v4));
    let reference = reference::allocate(
        &txn,
        property_type,
        now,
        candidates.take(reference::MAX_ATTEMPTS),
    )
    .await?;
    let listing = property::ActiveModel {
        id: Set(id),
        reference: Set(reference),
        title: Set(title.trim().to_string()),
        description: Set(description),
        price: Set(price),
        area: Set(area),
        land_area: Set(land_area),
        rooms: Set(rooms),
        bedrooms: Set(bedrooms),
        bathrooms: Set(bathrooms),
        property_type: Set(property_type),
        transaction_type: Set(transaction_type),
        status: Set(PropertyStatus::Draft),
        location: Set(location),
        address: Set(address),
        city: Set(city.trim().to_string()),
        postal_code: Set(postal_code),
        available_from: Set(available_from),
        views: Set(0),
        owner_id: Set(actor.user_id),
        agency_id: Set(owner.agency_id),
        created_at: Set(now),
        updated_at: Set(now),
        published_at: Set(None),
    };

    ensure_amenities_exist(&txn, &amenities).await?;
    let model = listing.insert(&txn).await?;
    replace_images(&txn, id, &images).await?;
    replace_amenities(&txn, id, &amenities).await?;
    txn.commit().await?;

    tracing::info!(property_id = %id, reference = %model.reference, owner_id = %actor.user_id, "listing created");
    Ok(Property::from(model))
}

/// Apply a partial update. Image and amenity lists, when present, replace
/// the stored ones wholesale.
///
/// # Errors
///
/// - `NotFound` when missing or not owned by `actor`
/// - `ValidationFailed` for an invalid payload, or a status change on a draft
pub async fn update_listing(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
    payload: UpdateProperty,
) -> Result<Property, ApiError> {
    payload.validate()?;

    let txn = db.begin().await?;
    let existing = find_owned(&txn, id, actor).await?;

    if payload.status.is_some() && existing.status == PropertyStatus::Draft {
        let mut errors = ValidationErrors::new();
        errors.push("status", "Publish the listing before changing its status");
        return Err(errors.into());
    }
    if let Some(links) = &payload.amenities {
        ensure_amenities_exist(&txn, links).await?;
    }

    let mut listing: property::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        listing.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        listing.description = Set(description);
    }
    if let Some(price) = payload.price {
        listing.price = Set(price);
    }
    if let Some(area) = payload.area {
        listing.area = Set(area);
    }
    if let Some(land_area) = payload.land_area {
        listing.land_area = Set(land_area);
    }
    if let Some(rooms) = payload.rooms {
        listing.rooms = Set(rooms);
    }
    if let Some(bedrooms) = payload.bedrooms {
        listing.bedrooms = Set(bedrooms);
    }
    if let Some(bathrooms) = payload.bathrooms {
        listing.bathrooms = Set(bathrooms);
    }
    if let Some(property_type) = payload.property_type {
        listing.property_type = Set(property_type);
    }
    if let Some(transaction_type) = payload.transaction_type {
        listing.transaction_type = Set(transaction_type);
    }
    if let Some(status) = payload.status {
        listing.status = Set(status);
    }
    if let Some(location) = payload.location {
        listing.location = Set(location);
    }
    if let Some(address) = payload.address {
        listing.address = Set(address);
    }
    if let Some(city) = payload.city {
        listing.city = Set(city.trim().to_string());
    }
    if let Some(postal_code) = payload.postal_code {
        listing.postal_code = Set(postal_code);
    }
    if let Some(available_from) = payload.available_from {
        listing.available_from = Set(available_from);
    }
    listing.updated_at = Set(Utc::now());

    let model = listing.update(&txn).await?;
    if let Some(images) = &payload.images {
        replace_images(&txn, id, images).await?;
    }
    if let Some(links) = &payload.amenities {
        replace_amenities(&txn, id, links).await?;
    }
    txn.commit().await?;

    tracing::info!(property_id = %id, status = %model.status.to_value(), "listing updated");
    Ok(Property::from(model))
}

/// Delete a listing with its images and amenity links.
///
/// # Errors
///
/// `NotFound` when missing or not owned by `actor`.
pub async fn delete_listing(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
) -> Result<Uuid, ApiError> {
    let txn = db.begin().await?;
    find_owned(&txn, id, actor).await?;

    property_image::Entity::delete_many()
        .filter(property_image::Column::PropertyId.eq(id))
        .exec(&txn)
        .await?;
    property_amenity::Entity::delete_many()
        .filter(property_amenity::Column::PropertyId.eq(id))
        .exec(&txn)
        .await?;
    property::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(property_id = %id, owner_id = %actor.user_id, "listing deleted");
    Ok(id)
}

/// `draft` to `available`.
///
/// # Errors
///
/// - `NotFound` when missing or not owned by `actor`
/// - `Conflict` when the listing is not a draft
pub async fn publish_listing(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
) -> Result<Property, ApiError> {
    let txn = db.begin().await?;
    let existing = find_owned(&txn, id, actor).await?;
    match existing.status {
        PropertyStatus::Draft => {}
        PropertyStatus::Available => {
            return Err(ApiError::conflict("Property is already published"));
        }
        other => {
            return Err(ApiError::conflict(format!(
                "Cannot publish a listing with status '{}'",
                other.to_value()
            )));
        }
    }

    let now = Utc::now();
    let mut listing: property::ActiveModel = existing.into();
    listing.status = Set(PropertyStatus::Available);
    listing.published_at = Set(Some(now));
    listing.updated_at = Set(now);
    let model = listing.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(property_id = %id, "listing published");
    Ok(Property::from(model))
}

/// `available` back to `draft`; the publication date is cleared.
///
/// # Errors
///
/// - `NotFound` when missing or not owned by `actor`
/// - `Conflict` when the listing is not currently published
pub async fn unpublish_listing(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
) -> Result<Property, ApiError> {
    let txn = db.begin().await?;
    let existing = find_owned(&txn, id, actor).await?;
    if existing.status != PropertyStatus::Available {
        return Err(ApiError::conflict("Only published listings can be unpublished"));
    }

    let mut listing: property::ActiveModel = existing.into();
    listing.status = Set(PropertyStatus::Draft);
    listing.published_at = Set(None);
    listing.updated_at = Set(Utc::now());
    let model = listing.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(property_id = %id, "listing unpublished");
    Ok(Property::from(model))
}

/// First image of each listing, keyed by listing id. One query for the
/// whole page.
///
/// # Errors
///
/// Propagates store failures.
pub async fn cover_images<C: ConnectionTrait>(
    conn: &C,
    property_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, ApiError> {
    if property_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let images = property_image::Entity::find()
        .filter(property_image::Column::PropertyId.is_in(property_ids.iter().copied()))
        .order_by_asc(property_image::Column::Position)
        .all(conn)
        .await?;
    let mut covers = HashMap::with_capacity(property_ids.len());
    for image in images {
        covers.entry(image.property_id).or_insert(image.url);
    }
    Ok(covers)
}
