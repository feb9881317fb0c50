use clap::Parser;
use immocrate::{ServerConfig, create_app, init_logging, migration::Migrator};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let app = create_app(db, &config);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, strict_search = config.strict_search, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
