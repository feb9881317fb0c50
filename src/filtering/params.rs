use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

/// Query string exactly as axum hands it over: parameter name to raw value.
pub type RawQuery = HashMap<String, String>;

/// Who proposes the listing: a private individual or a professional agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Particulier,
    Professionnel,
}

impl OwnerType {
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "particulier" | "individual" => Some(Self::Particulier),
            "professionnel" | "professional" | "pro" => Some(Self::Professionnel),
            _ => None,
        }
    }
}

/// Query parameters accepted by `GET /properties`.
///
/// Every parameter is optional and parsed permissively: values that do not
/// parse are ignored rather than rejected, unless the server runs with
/// strict search enabled.
///
/// # Ranges
/// `price`, `area`, `landArea` and `rooms` take a `"min,max"` pair. A zero on
/// either side leaves that side open, so `price=100000,0` means "at least
/// 100 000" and `price=0,0` means no price filter. The split forms
/// (`priceMin`, `priceMax`, ...) override the matching side of the pair.
///
/// # Enumerations
/// `propertyTypes` is a comma list (`villa,maison`). Unknown values are
/// dropped.
///
/// # Pagination and sorting
/// `page` is 1-based; `limit` defaults to the configured page size and is
/// capped by the configured maximum.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring matched against location, city and address.
    #[param(example = "lyon")]
    pub location: Option<String>,
    /// Comma-separated property types.
    #[param(example = "villa,maison")]
    pub property_types: Option<String>,
    /// `achat` or `location`.
    #[param(example = "achat")]
    pub transaction_type: Option<String>,
    /// `particulier` or `professionnel` (alias: `proposedBy`).
    #[param(example = "professionnel")]
    pub owner_type: Option<String>,
    /// Comma-separated statuses; honoured only for the owner or an admin.
    #[param(example = "available")]
    pub status: Option<String>,
    /// Price pair `"min,max"`.
    #[param(example = "100000,250000")]
    pub price: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    /// Living area pair `"min,max"` in m².
    #[param(example = "50,0")]
    pub area: Option<String>,
    pub area_min: Option<String>,
    pub area_max: Option<String>,
    /// Land area pair `"min,max"` in m².
    pub land_area: Option<String>,
    /// Room count pair `"min,max"`.
    pub rooms: Option<String>,
    /// Minimum number of bedrooms.
    #[param(example = "2")]
    pub bedrooms: Option<String>,
    /// Comma-separated amenity ids; listings must have all of them.
    pub amenities: Option<String>,
    /// `YYYY-MM-DD`: listings free on or before that date.
    #[param(example = "2026-12-01")]
    pub available_at: Option<String>,
    pub owner_id: Option<String>,
    pub agency_id: Option<String>,
    #[param(example = "1")]
    pub page: Option<String>,
    #[param(example = "20")]
    pub limit: Option<String>,
    /// `price`, `area`, `createdAt`, `rooms` or `pertinence`.
    #[param(example = "price")]
    pub sort_field: Option<String>,
    /// `asc` or `desc`.
    #[param(example = "asc")]
    pub sort_direction: Option<String>,
}
