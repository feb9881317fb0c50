use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

mod common;
use common::{
    Seed, get, insert_amenity, insert_property, insert_user_with, send, setup_test_app,
    setup_test_db,
};
use immocrate::core::Actor;
use immocrate::entities::user::{UserRights, UserSettings, UserStatus};
use immocrate::entities::{AmenityCategory, PropertyStatus};

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_amenities_sorted_and_filtered_by_category() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    insert_amenity(&db, "Piscine", AmenityCategory::Exterior).await;
    insert_amenity(&db, "Cheminée", AmenityCategory::Interior).await;
    insert_amenity(&db, "Balcon", AmenityCategory::Exterior).await;
    let app = setup_test_app(db);

    let (status, _, body) = get(&app, "/amenities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Balcon", "Cheminée", "Piscine"]);

    let (_, _, body) = get(&app, "/amenities?category=exterieur", None).await;
    assert_eq!(names(&body), vec!["Balcon", "Piscine"]);

    // Unknown categories do not narrow the list.
    let (_, _, body) = get(&app, "/amenities?category=garden", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_only_admins_create_amenities() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);
    let payload = json!({ "name": "Ascenseur", "category": "equipment" });

    let (status, _, _) = send(&app, "POST", "/amenities", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = Actor::user(Uuid::new_v4());
    let (status, _, _) = send(&app, "POST", "/amenities", Some(&user), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = Actor::admin(Uuid::new_v4());
    let (status, _, created) = send(&app, "POST", "/amenities", Some(&admin), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ascenseur");
    assert_eq!(created["category"], "equipment");

    let (status, _, _) = send(&app, "POST", "/amenities", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _) = send(
        &app,
        "POST",
        "/amenities",
        Some(&admin),
        Some(json!({ "name": " ", "category": "interior" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_manage_amenities_right_allows_create() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let rights: UserRights = [UserRights::MANAGE_AMENITIES].into_iter().collect();
    let curator = insert_user_with(&db, UserStatus::Verified, None, UserSettings::default(), rights.clone()).await;
    let locked = insert_user_with(&db, UserStatus::Locked, None, UserSettings::default(), rights).await;
    let app = setup_test_app(db);

    let (status, _, created) = send(
        &app,
        "POST",
        "/amenities",
        Some(&curator),
        Some(json!({ "name": "Terrasse", "category": "exterior" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Terrasse");

    let (status, _, _) = send(
        &app,
        "POST",
        "/amenities",
        Some(&locked),
        Some(json!({ "name": "Jardin", "category": "exterior" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_amenity_cache_refreshes_after_create() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    insert_amenity(&db, "Garage", AmenityCategory::Exterior).await;
    let app = setup_test_app(db.clone());

    let (_, _, body) = get(&app, "/amenities", None).await;
    assert_eq!(names(&body), vec!["Garage"]);

    // Written behind the API's back: the cached catalogue is still served.
    insert_amenity(&db, "Cave", AmenityCategory::Interior).await;
    let (_, _, body) = get(&app, "/amenities", None).await;
    assert_eq!(names(&body), vec!["Garage"]);

    let admin = Actor::admin(Uuid::new_v4());
    let (status, _, _) = send(
        &app,
        "POST",
        "/amenities",
        Some(&admin),
        Some(json!({ "name": "Alarme", "category": "equipment" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, _, body) = get(&app, "/amenities", None).await;
    assert_eq!(names(&body), vec!["Alarme", "Cave", "Garage"]);
}

#[tokio::test]
async fn test_locations_list_public_cities_only() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let owner = Uuid::new_v4();
    for city in ["Lyon", "lyon", "Annecy", "Bordeaux"] {
        insert_property(&db, Seed { city: city.to_string(), ..Seed::available(owner) }).await;
    }
    insert_property(
        &db,
        Seed {
            city: "Grenoble".to_string(),
            status: PropertyStatus::Draft,
            ..Seed::available(owner)
        },
    )
    .await;
    insert_property(
        &db,
        Seed {
            city: "Brest".to_string(),
            status: PropertyStatus::Sold,
            ..Seed::available(owner)
        },
    )
    .await;
    let app = setup_test_app(db);

    let (status, _, body) = get(&app, "/locations", None).await;
    assert_eq!(status, StatusCode::OK);
    let cities: Vec<String> = serde_json::from_value(body).unwrap();
    assert_eq!(cities.len(), 4);
    assert!(cities.contains(&"Annecy".to_string()));
    assert!(cities.contains(&"Brest".to_string()));
    assert!(!cities.contains(&"Grenoble".to_string()));
    assert_eq!(cities.iter().filter(|c| c.eq_ignore_ascii_case("lyon")).count(), 1);

    let (_, _, body) = get(&app, "/locations?q=BOR", None).await;
    assert_eq!(body, json!(["Bordeaux"]));
}

#[tokio::test]
async fn test_locations_are_capped() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let owner = Uuid::new_v4();
    for n in 0..12 {
        insert_property(&db, Seed { city: format!("Ville {n:02}"), ..Seed::available(owner) }).await;
    }
    let app = setup_test_app(db);

    let (_, _, body) = get(&app, "/locations?q=ville", None).await;
    assert_eq!(body.as_array().unwrap().len(), 10);
    assert_eq!(body[0], "Ville 00");
}

#[tokio::test]
async fn test_publish_refreshes_locations() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let owner = Actor::user(Uuid::new_v4());
    let draft = insert_property(
        &db,
        Seed {
            city: "Grenoble".to_string(),
            status: PropertyStatus::Draft,
            ..Seed::available(owner.user_id)
        },
    )
    .await;
    let app = setup_test_app(db);

    let (_, _, body) = get(&app, "/locations", None).await;
    assert_eq!(body, json!([]));

    let uri = format!("/properties/{}/publish", draft.id);
    let (status, _, _) = send(&app, "POST", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = get(&app, "/locations", None).await;
    assert_eq!(body, json!(["Grenoble"]));
}

#[tokio::test]
async fn test_health_and_openapi_document() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = setup_test_app(db);

    let (status, _, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, doc) = get(&app, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/properties"].is_object());
    assert!(doc["paths"]["/properties/{id}/publish"].is_object());
    assert!(doc["paths"]["/locations"].is_object());
}
