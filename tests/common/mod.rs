#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use immocrate::core::Actor;
use immocrate::entities::agency::{self, AgencyStatus};
use immocrate::entities::user::{self, UserRights, UserSettings, UserStatus, UserType};
use immocrate::entities::{
    AmenityCategory, PropertyStatus, PropertyType, TransactionType, amenity, property,
    property_amenity, property_image,
};
use immocrate::migration::Migrator;
use immocrate::{ServerConfig, create_app};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    create_app(db, &ServerConfig::default())
}

pub fn setup_strict_app(db: DatabaseConnection) -> Router {
    let config = ServerConfig {
        strict_search: true,
        ..Default::default()
    };
    create_app(db, &config)
}

/// Send one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<&Actor>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor.user_id.to_string());
        if actor.is_admin {
            builder = builder.header("x-user-role", "admin");
        }
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, json)
}

pub async fn get(app: &Router, uri: &str, actor: Option<&Actor>) -> (StatusCode, HeaderMap, Value) {
    send(app, "GET", uri, actor, None).await
}

/// Percent-encode a query value.
pub fn q(value: &str) -> String {
    url_escape::encode_component(value).to_string()
}

pub async fn insert_agency(db: &DatabaseConnection, status: AgencyStatus) -> Uuid {
    let id = Uuid::new_v4();
    agency::ActiveModel {
        id: Set(id),
        name: Set(format!("Agence {}", &id.to_string()[..8])),
        status: Set(status),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn insert_user(
    db: &DatabaseConnection,
    status: UserStatus,
    agency_id: Option<Uuid>,
) -> Actor {
    insert_user_with(db, status, agency_id, UserSettings::default(), UserRights::default()).await
}

pub async fn insert_user_with(
    db: &DatabaseConnection,
    status: UserStatus,
    agency_id: Option<Uuid>,
    settings: UserSettings,
    rights: UserRights,
) -> Actor {
    let id = Uuid::new_v4();
    user::ActiveModel {
        id: Set(id),
        email: Set(format!("{id}@example.test")),
        display_name: Set("Test user".to_string()),
        user_type: Set(if agency_id.is_some() {
            UserType::Professional
        } else {
            UserType::Individual
        }),
        status: Set(status),
        agency_id: Set(agency_id),
        settings: Set(settings),
        rights: Set(rights),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
    Actor::user(id)
}

pub async fn insert_amenity(db: &DatabaseConnection, name: &str, category: AmenityCategory) -> Uuid {
    let id = Uuid::new_v4();
    amenity::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        category: Set(category),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn link_amenity(db: &DatabaseConnection, property_id: Uuid, amenity_id: Uuid) {
    property_amenity::ActiveModel {
        property_id: Set(property_id),
        amenity_id: Set(amenity_id),
        area: Set(None),
        count: Set(Some(1)),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_image(db: &DatabaseConnection, property_id: Uuid, url: &str, position: i32) {
    property_image::ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property_id),
        url: Set(url.to_string()),
        position: Set(position),
    }
    .insert(db)
    .await
    .unwrap();
}

/// Listing fixture. Start from [`Seed::available`] and override fields with
/// struct update syntax.
#[derive(Debug, Clone)]
pub struct Seed {
    pub title: String,
    pub price: f64,
    pub area: Option<f64>,
    pub rooms: Option<i32>,
    pub bedrooms: Option<i32>,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub status: PropertyStatus,
    pub city: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub owner_id: Uuid,
    pub agency_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Seed {
    pub fn available(owner_id: Uuid) -> Self {
        Self {
            title: "Maison familiale".to_string(),
            price: 200_000.0,
            area: Some(100.0),
            rooms: Some(4),
            bedrooms: Some(3),
            property_type: PropertyType::House,
            transaction_type: TransactionType::Sale,
            status: PropertyStatus::Available,
            city: "Lyon".to_string(),
            location: None,
            address: None,
            available_from: None,
            owner_id,
            agency_id: None,
            created_at: base_time(),
        }
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

/// `base_time()` plus `n` minutes, for deterministic creation order.
pub fn minutes(n: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(n)
}

pub async fn insert_property(db: &DatabaseConnection, seed: Seed) -> property::Model {
    let id = Uuid::new_v4();
    let published_at = seed.status.is_public().then_some(seed.created_at);
    property::ActiveModel {
        id: Set(id),
        reference: Set(format!("TST-0000-{}", &id.simple().to_string()[..6])),
        title: Set(seed.title),
        description: Set(None),
        price: Set(seed.price),
        area: Set(seed.area),
        land_area: Set(None),
        rooms: Set(seed.rooms),
        bedrooms: Set(seed.bedrooms),
        bathrooms: Set(None),
        property_type: Set(seed.property_type),
        transaction_type: Set(seed.transaction_type),
        status: Set(seed.status),
        location: Set(seed.location),
        address: Set(seed.address),
        city: Set(seed.city),
        postal_code: Set(None),
        available_from: Set(seed.available_from),
        views: Set(0),
        owner_id: Set(seed.owner_id),
        agency_id: Set(seed.agency_id),
        created_at: Set(seed.created_at),
        updated_at: Set(seed.created_at),
        published_at: Set(published_at),
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn ids(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
