use utoipa::OpenApi;

use crate::entities::{AmenityCategory, PropertyStatus, PropertyType, TransactionType};
use crate::filtering::{OwnerType, Page, PaginationMeta, SortDirection, SortField};
use crate::models::{
    Amenity, AmenityLink, CreateAmenity, CreateProperty, DeletedResponse, OwnerContact, Property,
    PropertyAmenityView, PropertyDetail, PropertyImage, PropertySummary, UpdateProperty,
};
use crate::routes::{catalog, properties};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "immocrate",
        description = "Real-estate listing search and lifecycle API"
    ),
    paths(
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::update_property,
        properties::delete_property,
        properties::publish_property,
        properties::unpublish_property,
        catalog::list_amenities,
        catalog::create_amenity,
        catalog::list_locations,
        catalog::health,
    ),
    components(schemas(
        Property,
        PropertySummary,
        PropertyDetail,
        OwnerContact,
        PropertyImage,
        PropertyAmenityView,
        CreateProperty,
        UpdateProperty,
        AmenityLink,
        Amenity,
        CreateAmenity,
        DeletedResponse,
        PaginationMeta,
        Page<PropertySummary>,
        PropertyType,
        TransactionType,
        PropertyStatus,
        AmenityCategory,
        OwnerType,
        SortField,
        SortDirection,
    )),
    tags(
        (name = "properties", description = "Listing search and lifecycle"),
        (name = "catalog", description = "Amenities and location suggestions"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/properties",
            "/properties/{id}",
            "/properties/{id}/publish",
            "/properties/{id}/unpublish",
            "/amenities",
            "/locations",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
