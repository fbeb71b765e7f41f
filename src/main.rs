use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use rust_lavka::api::create_api_router;
use rust_lavka::config::AppConfig;
use rust_lavka::entities::{seed_products, setup_schema};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_products(&db, &config.image_base_url)
        .await
        .expect("Failed to seed products");

    let app = create_api_router(Arc::new(db), config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    tracing::info!("Running at {:?}", listener);
    axum::serve(listener, app).await.unwrap();
}
