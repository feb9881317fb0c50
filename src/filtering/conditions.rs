use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{BinOper, Expr, Func, Query, SimpleExpr},
};

use super::normalize::PropertyFilters;
use super::params::OwnerType;
use super::range::NumericRange;
use crate::core::Actor;
use crate::entities::{PropertyStatus, property, property_amenity};

/// Columns the free-text location facet is matched against.
const LOCATION_COLUMNS: [property::Column; 3] = [
    property::Column::Location,
    property::Column::City,
    property::Column::Address,
];

/// Drop a caller-supplied status unless the caller may see non-public
/// listings: admins always, owners when the query is scoped to themselves.
#[must_use]
pub fn restrict_to_actor(mut filters: PropertyFilters, actor: Option<&Actor>) -> PropertyFilters {
    if filters.status.is_none() {
        return filters;
    }
    let allowed = actor.is_some_and(|actor| actor.is_admin || filters.owner_id == Some(actor.user_id));
    if !allowed {
        tracing::debug!(status = ?filters.status, "status filter ignored for unprivileged caller");
        filters.status = None;
    }
    filters
}

const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` metacharacters so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `UPPER(col) LIKE UPPER('%term%') ESCAPE '\'`. Both sides go through the
/// database's `UPPER`, so they fold the same way even where it is ASCII-only.
fn contains_ci(column: property::Column, term: &str) -> SimpleExpr {
    let pattern = Func::upper(Expr::val(format!("%{}%", escape_like(term))));
    let escaped = SimpleExpr::Binary(
        Box::new(pattern.into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
    );
    Expr::expr(Func::upper(Expr::col((property::Entity, column)))).binary(BinOper::Like, escaped)
}

fn range_condition(column: property::Column, range: NumericRange) -> Condition {
    let mut condition = Condition::all();
    if let Some(min) = range.min {
        condition = condition.add(column.gte(min));
    }
    if let Some(max) = range.max {
        condition = condition.add(column.lte(max));
    }
    condition
}

/// Translate normalised facets into one `Condition` (logical AND).
///
/// Building is pure: the result is handed to the store, which is the only
/// place a query runs.
#[must_use]
pub fn build_condition(filters: &PropertyFilters) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = &filters.location {
        let any_column = LOCATION_COLUMNS
            .into_iter()
            .fold(Condition::any(), |acc, column| acc.add(contains_ci(column, term)));
        condition = condition.add(any_column);
    }

    if let Some(types) = &filters.property_types {
        condition = condition.add(property::Column::PropertyType.is_in(types.iter().copied()));
    }
    if let Some(transaction) = filters.transaction_type {
        condition = condition.add(property::Column::TransactionType.eq(transaction));
    }

    let ranges = [
        (property::Column::Price, filters.price),
        (property::Column::Area, filters.area),
        (property::Column::LandArea, filters.land_area),
        (property::Column::Rooms, filters.rooms),
    ];
    for (column, range) in ranges {
        if let Some(range) = range {
            condition = condition.add(range_condition(column, range));
        }
    }

    if let Some(bedrooms) = filters.bedrooms {
        condition = condition.add(property::Column::Bedrooms.gte(bedrooms));
    }

    condition = match &filters.status {
        Some(statuses) => condition.add(property::Column::Status.is_in(statuses.iter().copied())),
        None => condition.add(property::Column::Status.is_in(PropertyStatus::PUBLIC)),
    };

    if let Some(owner_id) = filters.owner_id {
        condition = condition.add(property::Column::OwnerId.eq(owner_id));
    }
    if let Some(agency_id) = filters.agency_id {
        condition = condition.add(property::Column::AgencyId.eq(agency_id));
    }

    if let Some(owner_type) = filters.owner_type {
        condition = condition.add(match owner_type {
            OwnerType::Particulier => property::Column::AgencyId.is_null(),
            OwnerType::Professionnel => property::Column::AgencyId.is_not_null(),
        });
    }

    // One sub-select per amenity: a listing must carry every requested amenity.
    if let Some(amenities) = &filters.amenities {
        for amenity_id in amenities {
            let carriers = Query::select()
                .column(property_amenity::Column::PropertyId)
                .from(property_amenity::Entity)
                .and_where(property_amenity::Column::AmenityId.eq(*amenity_id))
                .to_owned();
            condition = condition.add(property::Column::Id.in_subquery(carriers));
        }
    }

    if let Some(date) = filters.available_at {
        condition = condition.add(
            Condition::any()
                .add(property::Column::AvailableFrom.is_null())
                .add(property::Column::AvailableFrom.lte(date)),
        );
    }

    condition
}
