//! Schema migrations. Tables are derived from the entities so the two can
//! never drift; indexes back the search facets and the default sort.

use sea_orm::Schema;
use sea_orm_migration::prelude::*;

use crate::entities::{agency, amenity, property, property_amenity, property_image, user};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateListingTables), Box::new(CreateSearchIndexes)]
    }
}

pub struct CreateListingTables;

#[async_trait::async_trait]
impl MigrationName for CreateListingTables {
    fn name(&self) -> &'static str {
        "m20250101_000001_create_listing_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateListingTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());
        let tables = [
            schema.create_table_from_entity(agency::Entity),
            schema.create_table_from_entity(user::Entity),
            schema.create_table_from_entity(amenity::Entity),
            schema.create_table_from_entity(property::Entity),
            schema.create_table_from_entity(property_image::Entity),
            schema.create_table_from_entity(property_amenity::Entity),
        ];
        for mut table in tables {
            manager.create_table(table.if_not_exists().to_owned()).await?;
        }
        for mut index in schema.create_index_from_entity(property_image::Entity) {
            manager.create_index(index.if_not_exists().to_owned()).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(property_amenity::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(property_image::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(property::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(amenity::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(user::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(agency::Entity).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateSearchIndexes;

#[async_trait::async_trait]
impl MigrationName for CreateSearchIndexes {
    fn name(&self) -> &'static str {
        "m20250101_000002_create_search_indexes"
    }
}

const PROPERTY_INDEXES: [(&str, &[property::Column]); 5] = [
    (
        "idx_properties_status_created_at",
        &[property::Column::Status, property::Column::CreatedAt],
    ),
    ("idx_properties_city", &[property::Column::City]),
    ("idx_properties_price", &[property::Column::Price]),
    ("idx_properties_owner_id", &[property::Column::OwnerId]),
    ("idx_properties_agency_id", &[property::Column::AgencyId]),
];

#[async_trait::async_trait]
impl MigrationTrait for CreateSearchIndexes {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, columns) in PROPERTY_INDEXES {
            let mut index = Index::create();
            index.name(name).table(property::Entity).if_not_exists();
            for column in columns {
                index.col(*column);
            }
            manager.create_index(index.to_owned()).await?;
        }
        manager
            .create_index(
                Index::create()
                    .name("idx_property_amenities_amenity_id")
                    .table(property_amenity::Entity)
                    .col(property_amenity::Column::AmenityId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in PROPERTY_INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(property::Entity).to_owned())
                .await?;
        }
        manager
            .drop_index(
                Index::drop()
                    .name("idx_property_amenities_amenity_id")
                    .table(property_amenity::Entity)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
