use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{PropertyType, property};
use crate::errors::ApiError;

/// Candidate ids tried before giving up on a free reference.
pub const MAX_ATTEMPTS: usize = 8;

fn prefix(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::Apartment => "APP",
        PropertyType::House => "MAI",
        PropertyType::Villa => "VIL",
        PropertyType::Office => "BUR",
        PropertyType::Land => "TER",
        PropertyType::AgriculturalLand => "TAG",
    }
}

/// Human-facing listing reference, e.g. `MAI-2610-3F2A9C`:
/// type prefix, creation year and month, then the first six hex digits of
/// an id (the listing's own unless that reference is taken).
#[must_use]
pub fn generate(property_type: PropertyType, created_at: DateTime<Utc>, id: Uuid) -> String {
    let hex = id.simple().to_string().to_ascii_uppercase();
    format!(
        "{}-{}-{}",
        prefix(property_type),
        created_at.format("%y%m"),
        &hex[..6]
    )
}

/// Pick the first reference built from `candidates` that no stored listing
/// carries yet. Run it inside the transaction that inserts the listing.
///
/// # Errors
///
/// `Conflict` when every candidate is taken, or a database error.
pub async fn allocate<C, I>(
    conn: &C,
    property_type: PropertyType,
    created_at: DateTime<Utc>,
    candidates: I,
) -> Result<String, ApiError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = Uuid>,
{
    for id in candidates {
        let reference = generate(property_type, created_at, id);
        let taken = property::Entity::find()
            .filter(property::Column::Reference.eq(reference.as_str()))
            .count(conn)
            .await?;
        if taken == 0 {
            return Ok(reference);
        }
        tracing::debug!(%reference, "reference already taken, retrying");
    }
    Err(ApiError::conflict("Could not allocate a listing reference"))
}
