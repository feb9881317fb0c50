//! # Property Search Filtering
//!
//! Query-string to SQL translation for `GET /properties`, in three pure
//! stages:
//!
//! 1. [`normalize`](normalize::normalize) parses the raw query map into
//!    [`PropertyFilters`], a [`SortSpec`] and a [`PageRequest`];
//! 2. [`restrict_to_actor`] strips facets the caller is not entitled to;
//! 3. [`build_condition`] turns the facets into a sea-orm `Condition`.
//!
//! Execution (count + page) lives in [`crate::core::search`].
//!
//! ## Query Parameter Examples
//!
//! ```text
//! GET /properties?location=lyon&propertyTypes=villa,maison&transactionType=achat
//! GET /properties?price=100000,250000&bedrooms=2&sortField=price&sortDirection=asc
//! GET /properties?area=80,0&page=2&limit=20
//! GET /properties?amenities=<uuid>,<uuid>&availableAt=2026-12-01
//! GET /properties?ownerId=<me>&status=draft          (owner only)
//! ```

pub mod conditions;
pub mod normalize;
pub mod pagination;
pub mod params;
pub mod range;
pub mod sort;

pub use conditions::{build_condition, restrict_to_actor};
pub use normalize::{NormalizedQuery, PropertyFilters, normalize, validate_query};
pub use pagination::{Page, PageRequest, PaginationMeta, calculate_content_range, total_pages};
pub use params::{OwnerType, RawQuery, SearchQuery};
pub use range::{Bound, NumericRange};
pub use sort::{SortDirection, SortField, SortSpec, apply_sort};
