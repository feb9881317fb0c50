use axum::http::header::{CONTENT_RANGE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 1-based page request, already normalised (both fields positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

/// Database drivers bind `OFFSET` as a signed 64-bit integer.
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

impl PageRequest {
    /// `(page - 1) * limit`, capped at the largest offset a driver accepts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_OFFSET)
    }
}

/// `ceil(total / limit)`; zero when there is nothing to page through.
#[must_use]
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages: total_pages(total, request.limit),
        }
    }
}

/// Outbound envelope for every paginated listing response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(total, request),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Build the `Content-Range` header for a page:
/// `properties 20-39/125`, or `properties */125` when the page is empty.
#[must_use]
pub fn calculate_content_range(
    resource_name: &str,
    offset: u64,
    item_count: usize,
    total_count: u64,
) -> HeaderMap {
    let safe_name: String = resource_name
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();

    let content_range = if item_count == 0 {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset + item_count as u64 - 1;
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&content_range) {
        headers.insert(CONTENT_RANGE, value);
    }
    headers
}
