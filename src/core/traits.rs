use async_trait::async_trait;
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::entities::property;
use crate::filtering::{SortSpec, apply_sort};

/// Read side of listing persistence, as seen by the search stage.
///
/// Both calls receive the same condition so the total and the page always
/// describe the same result set.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn count(&self, condition: Condition) -> Result<u64, DbErr>;

    async fn find_page(
        &self,
        condition: Condition,
        sort: SortSpec,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<property::Model>, DbErr>;
}

#[async_trait]
impl ListingStore for DatabaseConnection {
    async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        PaginatorTrait::count(property::Entity::find().filter(condition), self).await
    }

    async fn find_page(
        &self,
        condition: Condition,
        sort: SortSpec,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<property::Model>, DbErr> {
        apply_sort(property::Entity::find().filter(condition), sort)
            .offset(offset)
            .limit(limit)
            .all(self)
            .await
    }
}
