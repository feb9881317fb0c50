//! Filter normalisation: raw query strings in, typed facets out.
//!
//! One parser serves two modes. [`normalize`] is permissive and drops
//! anything it cannot use (logged at debug level); [`validate_query`] runs
//! the same parser and fails with one [`ValidationError`] per dropped value.
//!
//! [`ValidationError`]: crate::validation::ValidationError

use chrono::{DateTime, NaiveDate};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::params::{OwnerType, RawQuery};
use super::pagination::PageRequest;
use super::range::{self, Bound, NumericRange};
use super::sort::{SortDirection, SortField, SortSpec};
use crate::config::SearchSettings;
use crate::entities::{PropertyStatus, PropertyType, TransactionType};
use crate::validation::ValidationErrors;

const MAX_LOCATION_LENGTH: usize = 200;

/// Typed search facets. Every field is optional; `None` means "do not
/// filter on this dimension".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilters {
    pub location: Option<String>,
    pub property_types: Option<BTreeSet<PropertyType>>,
    pub transaction_type: Option<TransactionType>,
    pub price: Option<NumericRange>,
    pub area: Option<NumericRange>,
    pub land_area: Option<NumericRange>,
    pub rooms: Option<NumericRange>,
    /// Minimum bedroom count.
    pub bedrooms: Option<u32>,
    pub status: Option<BTreeSet<PropertyStatus>>,
    pub owner_id: Option<Uuid>,
    pub agency_id: Option<Uuid>,
    pub owner_type: Option<OwnerType>,
    pub amenities: Option<BTreeSet<Uuid>>,
    pub available_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub filters: PropertyFilters,
    pub sort: SortSpec,
    pub page: PageRequest,
}

/// Permissive normalisation: never fails.
#[must_use]
pub fn normalize(raw: &RawQuery, settings: &SearchSettings) -> NormalizedQuery {
    let mut parser = QueryParser::new(raw, settings);
    let query = parser.parse();
    for issue in parser.issues.errors() {
        tracing::debug!(field = %issue.field, reason = %issue.message, "ignoring search parameter");
    }
    query
}

/// Strict normalisation.
///
/// # Errors
///
/// Returns every parameter the permissive parser would have dropped.
pub fn validate_query(
    raw: &RawQuery,
    settings: &SearchSettings,
) -> Result<NormalizedQuery, ValidationErrors> {
    let mut parser = QueryParser::new(raw, settings);
    let query = parser.parse();
    parser.issues.result().map(|()| query)
}

struct QueryParser<'a> {
    raw: &'a RawQuery,
    settings: &'a SearchSettings,
    issues: ValidationErrors,
}

impl<'a> QueryParser<'a> {
    fn new(raw: &'a RawQuery, settings: &'a SearchSettings) -> Self {
        Self {
            raw,
            settings,
            issues: ValidationErrors::new(),
        }
    }

    fn parse(&mut self) -> NormalizedQuery {
        let filters = PropertyFilters {
            location: self.location(),
            property_types: self.enum_set(&["propertyTypes", "propertyType"], PropertyType::parse_token),
            transaction_type: self.enum_single(&["transactionType"], TransactionType::parse_token),
            price: self.range("price", "priceMin", "priceMax"),
            area: self.range("area", "areaMin", "areaMax"),
            land_area: self.range("landArea", "landAreaMin", "landAreaMax"),
            rooms: self.range("rooms", "roomsMin", "roomsMax"),
            bedrooms: self.bedrooms(),
            status: self.enum_set(&["status"], PropertyStatus::parse_token),
            owner_id: self.uuid("ownerId"),
            agency_id: self.uuid("agencyId"),
            owner_type: self.enum_single(&["ownerType", "proposedBy"], OwnerType::parse_token),
            amenities: self.uuid_set("amenities"),
            available_at: self.date("availableAt"),
        };

        let sort = SortSpec {
            field: self
                .enum_single(&["sortField"], SortField::parse_token)
                .unwrap_or(SortSpec::default().field),
            direction: self
                .enum_single(&["sortDirection"], SortDirection::parse_token)
                .unwrap_or(SortSpec::default().direction),
        };

        let page = PageRequest {
            page: self.positive_int("page").unwrap_or(1),
            limit: self
                .positive_int("limit")
                .unwrap_or(self.settings.default_page_size)
                .min(self.settings.max_page_size),
        };

        NormalizedQuery {
            filters,
            sort,
            page,
        }
    }

    /// First non-blank value among `keys`, with the key it came from.
    fn lookup(&self, keys: &[&'static str]) -> Option<(&'static str, &'a str)> {
        keys.iter().find_map(|&key| {
            self.raw
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
    }

    fn value(&self, key: &'static str) -> Option<&'a str> {
        self.lookup(&[key]).map(|(_, v)| v)
    }

    fn location(&mut self) -> Option<String> {
        let value = self.value("location")?;
        if value.chars().count() > MAX_LOCATION_LENGTH {
            self.issues.push("location", "is too long");
            return None;
        }
        Some(value.to_string())
    }

    fn enum_single<T>(&mut self, keys: &[&'static str], parse: fn(&str) -> Option<T>) -> Option<T> {
        let (key, value) = self.lookup(keys)?;
        let parsed = parse(value);
        if parsed.is_none() {
            self.issues.push(key, format!("unknown value '{value}'"));
        }
        parsed
    }

    fn enum_set<T: Ord>(
        &mut self,
        keys: &[&'static str],
        parse: fn(&str) -> Option<T>,
    ) -> Option<BTreeSet<T>> {
        let (key, value) = self.lookup(keys)?;
        let mut set = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match parse(token) {
                Some(parsed) => {
                    set.insert(parsed);
                }
                None => self.issues.push(key, format!("unknown value '{token}'")),
            }
        }
        (!set.is_empty()).then_some(set)
    }

    fn bound(&mut self, key: &'static str) -> Bound {
        let Some(value) = self.value(key) else {
            return Bound::Keep;
        };
        match range::parse_bound(value) {
            Ok(parsed) => Bound::from(parsed),
            Err(reason) => {
                self.issues.push(key, reason);
                Bound::Keep
            }
        }
    }

    fn range(
        &mut self,
        pair_key: &'static str,
        min_key: &'static str,
        max_key: &'static str,
    ) -> Option<NumericRange> {
        let pair = self.value(pair_key).and_then(|value| {
            range::parse_pair(value).unwrap_or_else(|reason| {
                self.issues.push(pair_key, reason);
                None
            })
        });
        let min = self.bound(min_key);
        let max = self.bound(max_key);
        NumericRange::overridden(pair, min, max)
    }

    fn bedrooms(&mut self) -> Option<u32> {
        let value = self.value("bedrooms")?;
        let minimum = match value.split_once(',') {
            Some((lo, hi)) => {
                if hi.trim().parse::<u32>().is_err() {
                    self.issues.push("bedrooms", "must be an integer or a pair of integers");
                    return None;
                }
                lo
            }
            None => value,
        };
        match minimum.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(n) => Some(n),
            Err(_) => {
                self.issues.push("bedrooms", "must be an integer or a pair of integers");
                None
            }
        }
    }

    fn uuid(&mut self, key: &'static str) -> Option<Uuid> {
        let value = self.value(key)?;
        Uuid::parse_str(value)
            .inspect_err(|_| self.issues.push(key, "must be a UUID"))
            .ok()
    }

    fn uuid_set(&mut self, key: &'static str) -> Option<BTreeSet<Uuid>> {
        let value = self.value(key)?;
        let mut set = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match Uuid::parse_str(token) {
                Ok(id) => {
                    set.insert(id);
                }
                Err(_) => self.issues.push(key, format!("'{token}' is not a UUID")),
            }
        }
        (!set.is_empty()).then_some(set)
    }

    fn date(&mut self, key: &'static str) -> Option<NaiveDate> {
        let value = self.value(key)?;
        let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()));
        if parsed.is_none() {
            self.issues.push(key, "must be a date (YYYY-MM-DD)");
        }
        parsed
    }

    fn positive_int(&mut self, key: &'static str) -> Option<u64> {
        let value = self.value(key)?;
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                self.issues.push(key, "must be a positive integer");
                None
            }
        }
    }
}
