use sea_orm::{QueryOrder, Select, sea_query::Order};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::property;

/// Sortable listing columns. `Pertinence` leaves the store's natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Area,
    CreatedAt,
    Rooms,
    Pertinence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

// Shared default values
const DEFAULT_SORT_FIELD: SortField = SortField::CreatedAt;
const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Desc;

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD,
            direction: DEFAULT_SORT_DIRECTION,
        }
    }
}

impl SortField {
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "price" | "prix" => Some(Self::Price),
            "area" | "surface" => Some(Self::Area),
            "createdat" | "created_at" | "date" => Some(Self::CreatedAt),
            "rooms" | "pieces" => Some(Self::Rooms),
            "pertinence" | "relevance" => Some(Self::Pertinence),
            _ => None,
        }
    }

    /// Backing column, `None` for pertinence.
    #[must_use]
    pub fn column(self) -> Option<property::Column> {
        match self {
            Self::Price => Some(property::Column::Price),
            Self::Area => Some(property::Column::Area),
            Self::CreatedAt => Some(property::Column::CreatedAt),
            Self::Rooms => Some(property::Column::Rooms),
            Self::Pertinence => None,
        }
    }
}

impl SortDirection {
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Apply the requested ordering. Explicit sorts get `id` as a tie-breaker so
/// that consecutive pages never overlap on equal keys.
#[must_use]
pub fn apply_sort(select: Select<property::Entity>, sort: SortSpec) -> Select<property::Entity> {
    match sort.field.column() {
        Some(column) => select
            .order_by(column, sort.direction.into())
            .order_by(property::Column::Id, Order::Asc),
        None => select,
    }
}
