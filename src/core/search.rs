use sea_orm::{Condition, DbErr};

use super::Actor;
use super::traits::ListingStore;
use crate::entities::property;
use crate::filtering::{NormalizedQuery, Page, PageRequest, SortSpec, build_condition, restrict_to_actor};

/// Run the count and the page read concurrently and combine them.
///
/// A page past the end is not an error: it comes back with no items and
/// the real total.
///
/// # Errors
///
/// Returns the first store error; the other read is dropped.
pub async fn search_listings<S>(
    store: &S,
    condition: Condition,
    sort: SortSpec,
    page: PageRequest,
) -> Result<Page<property::Model>, DbErr>
where
    S: ListingStore + ?Sized,
{
    let (total, items) = tokio::try_join!(
        store.count(condition.clone()),
        store.find_page(condition, sort, page.offset(), page.limit),
    )?;
    tracing::debug!(total, returned = items.len(), page = page.page, "listing search");
    Ok(Page::new(items, total, page))
}

/// Full search for one caller: scope the facets, build the predicate, run it.
///
/// # Errors
///
/// Propagates store failures from [`search_listings`].
pub async fn search_properties<S>(
    store: &S,
    query: NormalizedQuery,
    actor: Option<&Actor>,
) -> Result<Page<property::Model>, DbErr>
where
    S: ListingStore + ?Sized,
{
    let filters = restrict_to_actor(query.filters, actor);
    let condition = build_condition(&filters);
    search_listings(store, condition, query.sort, query.page).await
}
