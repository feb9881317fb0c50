use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of real estate being listed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PropertyType {
    #[sea_orm(string_value = "appartement")]
    #[serde(rename = "appartement")]
    Apartment,
    #[sea_orm(string_value = "maison")]
    #[serde(rename = "maison")]
    House,
    #[sea_orm(string_value = "villa")]
    #[serde(rename = "villa")]
    Villa,
    #[sea_orm(string_value = "bureau")]
    #[serde(rename = "bureau")]
    Office,
    #[sea_orm(string_value = "terrain")]
    #[serde(rename = "terrain")]
    Land,
    #[sea_orm(string_value = "terrain_agricole")]
    #[serde(rename = "terrain_agricole")]
    AgriculturalLand,
}

impl PropertyType {
    /// Resolve a query-string token, accepting both the canonical wire value
    /// and the English alias. Matching is case-insensitive.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "appartement" | "apartment" => Some(Self::Apartment),
            "maison" | "house" => Some(Self::House),
            "villa" => Some(Self::Villa),
            "bureau" | "office" => Some(Self::Office),
            "terrain" | "land" => Some(Self::Land),
            "terrain_agricole" | "terrain-agricole" | "agricultural_land"
            | "agricultural-land" => Some(Self::AgriculturalLand),
            _ => None,
        }
    }
}

/// Whether the listing is for sale or for rent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionType {
    #[sea_orm(string_value = "achat")]
    #[serde(rename = "achat")]
    Sale,
    #[sea_orm(string_value = "location")]
    #[serde(rename = "location")]
    Rental,
}

impl TransactionType {
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "achat" | "sale" => Some(Self::Sale),
            "location" | "rental" | "rent" => Some(Self::Rental),
            _ => None,
        }
    }
}

/// Listing lifecycle status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "rented")]
    Rented,
    #[sea_orm(string_value = "disabled")]
    Disabled,
}

impl PropertyStatus {
    /// Statuses a public listing query returns when the caller did not ask
    /// for anything else.
    pub const PUBLIC: [Self; 3] = [Self::Available, Self::Sold, Self::Rented];

    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "draft" | "brouillon" => Some(Self::Draft),
            "available" | "disponible" => Some(Self::Available),
            "sold" | "vendu" => Some(Self::Sold),
            "rented" | "loue" => Some(Self::Rented),
            "disabled" | "desactive" => Some(Self::Disabled),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_public(self) -> bool {
        Self::PUBLIC.contains(&self)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub reference: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
