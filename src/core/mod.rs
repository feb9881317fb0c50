//! Listing services: search execution and the owner-scoped lifecycle.
//!
//! Handlers in [`crate::routes`] stay thin: they extract, call into this
//! module and shape the response.

pub mod catalog;
pub mod listings;
pub mod reference;
pub mod search;
pub mod traits;

use uuid::Uuid;

pub use listings::{
    create_listing, delete_listing, get_listing, publish_listing, unpublish_listing,
    update_listing,
};
pub use search::{search_listings, search_properties};
pub use traits::ListingStore;

/// The authenticated caller, as asserted by the upstream gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    #[must_use]
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    #[must_use]
    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }

    #[must_use]
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}
