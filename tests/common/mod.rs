use std::sync::Arc;

use rust_lavka::api::create_api_router;
use rust_lavka::config::{AppConfig, JwtConfig};
use rust_lavka::entities::{seed_products, setup_schema};
use sea_orm::{ConnectOptions, Database};

/// Boots the full router against a fresh in-memory database and returns the
/// base URL of the listening server.
pub async fn spawn_app() -> String {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    setup_schema(&db).await.expect("Failed to create schema");

    let config = test_config();
    seed_products(&db, &config.image_base_url)
        .await
        .expect("Failed to seed products");

    let app = create_api_router(Arc::new(db), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server crashed");
    });

    format!("http://{addr}")
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_owned(),
        image_base_url: "https://images.lavka.test".to_owned(),
        jwt: JwtConfig {
            secret: "this-is-a-secret-key-for-testing-with-minimum-256-bits-length".to_owned(),
            issuer: "lavka-api".to_owned(),
            audience: "lavka-client".to_owned(),
            expiry_hours: 2,
        },
    }
}

/// Registers a user and returns the bearer token plus the new user's id.
#[allow(dead_code)]
pub async fn register_user(
    client: &reqwest::Client,
    base: &str,
    username: &str,
    password: &str,
) -> (String, i64) {
    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse register response");

    let token = body["token"]
        .as_str()
        .expect("Token not found in register response")
        .to_owned();
    let user_id = body["user"]["id"]
        .as_i64()
        .expect("User id not found in register response");

    (token, user_id)
}

/// Fetches (and lazily creates) the user's cart, returning its id.
#[allow(dead_code)]
pub async fn fetch_cart_id(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    user_id: i64,
) -> i64 {
    let response = client
        .get(format!("{base}/api/cart/user/{user_id}"))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send get cart request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse cart response");

    body["id"].as_i64().expect("Cart id not found in response")
}
