//! API-facing request and response structs.
//!
//! Entities never leave the crate as-is: responses go through the views
//! below so that field naming (camelCase) and shape stay stable whatever
//! the storage layout.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{
    AmenityCategory, PropertyStatus, PropertyType, TransactionType, amenity, property,
    property_amenity, property_image, user,
};
use crate::validation::{Validatable, ValidationErrors};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_IMAGES: usize = 30;

/// Full listing as returned by lifecycle endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub reference: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub area: Option<f64>,
    pub land_area: Option<f64>,
    pub rooms: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub status: PropertyStatus,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub views: i64,
    pub owner_id: Uuid,
    pub agency_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<property::Model> for Property {
    fn from(model: property::Model) -> Self {
        Self {
            id: model.id,
            reference: model.reference,
            title: model.title,
            description: model.description,
            price: model.price,
            area: model.area,
            land_area: model.land_area,
            rooms: model.rooms,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            property_type: model.property_type,
            transaction_type: model.transaction_type,
            status: model.status,
            location: model.location,
            address: model.address,
            city: model.city,
            postal_code: model.postal_code,
            available_from: model.available_from,
            views: model.views,
            owner_id: model.owner_id,
            agency_id: model.agency_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            published_at: model.published_at,
        }
    }
}

/// Search result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: Uuid,
    pub reference: String,
    pub title: String,
    pub price: f64,
    pub area: Option<f64>,
    pub rooms: Option<i32>,
    pub bedrooms: Option<i32>,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub status: PropertyStatus,
    pub city: String,
    pub location: Option<String>,
    /// URL of the first image, if any.
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PropertySummary {
    #[must_use]
    pub fn from_model(model: property::Model, cover_image: Option<String>) -> Self {
        Self {
            id: model.id,
            reference: model.reference,
            title: model.title,
            price: model.price,
            area: model.area,
            rooms: model.rooms,
            bedrooms: model.bedrooms,
            property_type: model.property_type,
            transaction_type: model.transaction_type,
            status: model.status,
            city: model.city,
            location: model.location,
            cover_image,
            created_at: model.created_at,
            published_at: model.published_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: Uuid,
    pub url: String,
    pub position: i32,
}

impl From<property_image::Model> for PropertyImage {
    fn from(model: property_image::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            position: model.position,
        }
    }
}

/// Amenity attached to a listing, with the per-listing extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAmenityView {
    pub id: Uuid,
    pub name: String,
    pub category: AmenityCategory,
    pub area: Option<f64>,
    pub count: Option<i32>,
}

impl PropertyAmenityView {
    #[must_use]
    pub fn new(amenity: amenity::Model, link: &property_amenity::Model) -> Self {
        Self {
            id: amenity.id,
            name: amenity.name,
            category: amenity.category,
            area: link.area,
            count: link.count,
        }
    }
}

/// How to reach a listing's owner. Email and phone only appear when the
/// owner's settings allow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerContact {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<user::Model> for OwnerContact {
    fn from(owner: user::Model) -> Self {
        let settings = owner.settings;
        Self {
            display_name: owner.display_name,
            email: settings.show_email.then_some(owner.email),
            phone: settings.phone.filter(|_| settings.show_phone),
        }
    }
}

/// Listing with its images (in display order) and amenities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub images: Vec<PropertyImage>,
    pub amenities: Vec<PropertyAmenityView>,
    /// Absent when the owner account no longer exists.
    pub contact: Option<OwnerContact>,
}

/// Amenity reference inside a create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmenityLink {
    pub amenity_id: Uuid,
    pub area: Option<f64>,
    pub count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub area: Option<f64>,
    pub land_area: Option<f64>,
    pub rooms: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub available_from: Option<NaiveDate>,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<AmenityLink>,
}

/// Partial update. Absent fields are left alone; for nullable fields an
/// explicit `null` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<f64>)]
    pub area: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<f64>)]
    pub land_area: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub rooms: Option<Option<i32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub bedrooms: Option<Option<i32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub bathrooms: Option<Option<i32>>,
    pub property_type: Option<PropertyType>,
    pub transaction_type: Option<TransactionType>,
    /// Only `sold`, `rented`, `disabled` or `available` on a published listing.
    pub status: Option<PropertyStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    pub city: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub postal_code: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub available_from: Option<Option<NaiveDate>>,
    /// Replaces the whole image list when present.
    pub images: Option<Vec<String>>,
    /// Replaces every amenity link when present.
    pub amenities: Option<Vec<AmenityLink>>,
}

fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.trim().is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        errors.push("title", format!("Title must be at most {MAX_TITLE_LENGTH} characters"));
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    if !price.is_finite() || price <= 0.0 {
        errors.push("price", "Price must be a positive number");
    }
}

fn check_surface(errors: &mut ValidationErrors, field: &str, value: Option<f64>) {
    if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
        errors.push(field, "must be a non-negative number");
    }
}

fn check_count(errors: &mut ValidationErrors, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        errors.push(field, "must not be negative");
    }
}

fn check_city(errors: &mut ValidationErrors, city: &str) {
    if city.trim().is_empty() {
        errors.push("city", "City is required");
    }
}

fn check_images(errors: &mut ValidationErrors, images: &[String]) {
    if images.len() > MAX_IMAGES {
        errors.push("images", format!("At most {MAX_IMAGES} images are allowed"));
    }
    if images.iter().any(|url| url.trim().is_empty()) {
        errors.push("images", "Image URLs must not be empty");
    }
}

fn check_amenities(errors: &mut ValidationErrors, amenities: &[AmenityLink]) {
    let mut seen = HashSet::new();
    if !amenities.iter().all(|link| seen.insert(link.amenity_id)) {
        errors.push("amenities", "Each amenity may only be listed once");
    }
    for link in amenities {
        check_surface(errors, "amenities.area", link.area);
        check_count(errors, "amenities.count", link.count);
    }
}

impl Validatable for CreateProperty {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &self.title);
        check_price(&mut errors, self.price);
        check_surface(&mut errors, "area", self.area);
        check_surface(&mut errors, "landArea", self.land_area);
        check_count(&mut errors, "rooms", self.rooms);
        check_count(&mut errors, "bedrooms", self.bedrooms);
        check_count(&mut errors, "bathrooms", self.bathrooms);
        check_city(&mut errors, &self.city);
        check_images(&mut errors, &self.images);
        check_amenities(&mut errors, &self.amenities);
        errors.result()
    }
}

impl Validatable for UpdateProperty {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(title) = &self.title {
            check_title(&mut errors, title);
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        check_surface(&mut errors, "area", self.area.flatten());
        check_surface(&mut errors, "landArea", self.land_area.flatten());
        check_count(&mut errors, "rooms", self.rooms.flatten());
        check_count(&mut errors, "bedrooms", self.bedrooms.flatten());
        check_count(&mut errors, "bathrooms", self.bathrooms.flatten());
        if let Some(city) = &self.city {
            check_city(&mut errors, city);
        }
        if self.status == Some(PropertyStatus::Draft) {
            errors.push("status", "Use the unpublish action to return a listing to draft");
        }
        if let Some(images) = &self.images {
            check_images(&mut errors, images);
        }
        if let Some(amenities) = &self.amenities {
            check_amenities(&mut errors, amenities);
        }
        errors.result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub category: AmenityCategory,
}

impl From<amenity::Model> for Amenity {
    fn from(model: amenity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmenity {
    pub name: String,
    pub category: AmenityCategory,
}

impl Validatable for CreateAmenity {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        errors.result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub id: Uuid,
}
