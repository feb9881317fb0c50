//! Sea-ORM entities backing the listing API.
//!
//! Relations are resolved explicitly by the query layer (batch loads keyed
//! on `property_id`), so the `Relation` enums stay empty.

pub mod agency;
pub mod amenity;
pub mod property;
pub mod property_amenity;
pub mod property_image;
pub mod user;

pub use amenity::AmenityCategory;
pub use property::{PropertyStatus, PropertyType, TransactionType};
