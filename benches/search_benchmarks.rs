/*!
# Search Benchmarks

Benchmarks for the property search pipeline: query normalisation, condition
building and full `GET /properties` round-trips against in-memory SQLite.

## Usage

```bash
cargo bench --bench search_benchmarks

# Only the pure stages
cargo bench --bench search_benchmarks -- "Search Pipeline"

# Quick run with fewer samples
cargo bench --bench search_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use axum::{
    Router,
    body::Body,
    http::{Method, Request},
};
use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use immocrate::config::SearchSettings;
use immocrate::entities::{PropertyStatus, PropertyType, TransactionType, property};
use immocrate::filtering::{RawQuery, build_condition, normalize};
use immocrate::migration::Migrator;
use immocrate::{ServerConfig, create_app};
use sea_orm::{
    ActiveModelTrait, Database, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QueryTrait, Set,
};
use sea_orm_migration::MigratorTrait;
use std::hint::black_box;
use tokio::runtime::Runtime;
use tower::ServiceExt;
use uuid::Uuid;

const CITIES: [&str; 5] = ["Lyon", "Annecy", "Grenoble", "Bordeaux", "Nantes"];
const TYPES: [PropertyType; 3] = [PropertyType::Apartment, PropertyType::House, PropertyType::Villa];

fn raw(pairs: &[(&str, &str)]) -> RawQuery {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn typical_query() -> RawQuery {
    raw(&[
        ("location", "lyon"),
        ("propertyTypes", "appartement,maison"),
        ("transactionType", "achat"),
        ("price", "150000,400000"),
        ("bedrooms", "2"),
        ("sortField", "price"),
        ("sortDirection", "asc"),
        ("page", "2"),
        ("limit", "20"),
    ])
}

fn noisy_query() -> RawQuery {
    raw(&[
        ("location", "   "),
        ("propertyTypes", "chateau,,maison,MAISON"),
        ("price", "abc,500000"),
        ("area", "200,50"),
        ("status", "draft"),
        ("ownerId", "not-a-uuid"),
        ("sortField", "random"),
        ("page", "-3"),
        ("limit", "100000"),
    ])
}

async fn setup_database(listings: usize) -> Result<DatabaseConnection, Box<dyn std::error::Error>> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let owner = Uuid::new_v4();
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    for n in 0..listings {
        let id = Uuid::new_v4();
        let created_at = start + Duration::minutes(n as i64);
        property::ActiveModel {
            id: Set(id),
            reference: Set(format!("BEN-0000-{}", &id.simple().to_string()[..6])),
            title: Set(format!("Listing {n}")),
            description: Set(None),
            price: Set(100_000.0 + (n as f64) * 1_500.0),
            area: Set(Some(40.0 + (n % 120) as f64)),
            land_area: Set(None),
            rooms: Set(Some((n % 6) as i32 + 1)),
            bedrooms: Set(Some((n % 5) as i32)),
            bathrooms: Set(Some(1)),
            property_type: Set(TYPES[n % TYPES.len()]),
            transaction_type: Set(if n % 4 == 0 {
                TransactionType::Rental
            } else {
                TransactionType::Sale
            }),
            status: Set(if n % 10 == 0 {
                PropertyStatus::Draft
            } else {
                PropertyStatus::Available
            }),
            location: Set(None),
            address: Set(Some(format!("{n} rue de la Paix"))),
            city: Set(CITIES[n % CITIES.len()].to_string()),
            postal_code: Set(None),
            available_from: Set(None),
            views: Set(0),
            owner_id: Set(owner),
            agency_id: Set(None),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            published_at: Set(Some(created_at)),
        }
        .insert(&db)
        .await?;
    }
    Ok(db)
}

async fn run_search(app: Router, uri: &str) -> Result<(), Box<dyn std::error::Error>> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    black_box(body);
    Ok(())
}

fn bench_pipeline(c: &mut Criterion) {
    let settings = SearchSettings::default();
    let typical = typical_query();
    let noisy = noisy_query();

    let mut group = c.benchmark_group("Search Pipeline");

    group.bench_function("normalize_typical", |b| {
        b.iter(|| normalize(black_box(&typical), &settings));
    });
    group.bench_function("normalize_noisy", |b| {
        b.iter(|| normalize(black_box(&noisy), &settings));
    });

    let query = normalize(&typical, &settings);
    group.bench_function("build_condition", |b| {
        b.iter(|| build_condition(black_box(&query.filters)));
    });
    group.bench_function("render_sql", |b| {
        b.iter(|| {
            property::Entity::find()
                .filter(build_condition(&query.filters))
                .build(DbBackend::Sqlite)
                .to_string()
        });
    });

    group.finish();
}

fn bench_search_endpoint(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("Search Endpoint");

    for size in [100, 1_000] {
        let db = rt.block_on(setup_database(size)).unwrap();
        let app = create_app(db, &ServerConfig::default());

        group.bench_with_input(BenchmarkId::new("default_page", size), &app, |b, app| {
            b.iter(|| rt.block_on(black_box(run_search(app.clone(), "/properties"))));
        });
        group.bench_with_input(BenchmarkId::new("filtered_sorted", size), &app, |b, app| {
            b.iter(|| {
                rt.block_on(black_box(run_search(
                    app.clone(),
                    "/properties?location=lyon&propertyTypes=appartement,maison&price=150000,900000&sortField=price&sortDirection=asc&page=2",
                )))
            });
        });
    }

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(std::time::Duration::from_secs(5))
        .warm_up_time(std::time::Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_pipeline, bench_search_endpoint
}
criterion_main!(benches);
