pub mod auth;
pub mod cart;
pub mod notification;
pub mod product;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::{Extension, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::middleware::auth::auth_middleware;
use crate::middleware::logging::logging_middleware;

use auth::auth_router;
use cart::cart_router;
use notification::notification_router;
use product::product_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>, config: AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything except the auth routes sits behind the bearer check.
    let protected = Router::new()
        .merge(product_router())
        .merge(cart_router())
        .merge(notification_router())
        .layer(from_fn_with_state(config.jwt.clone(), auth_middleware));

    Router::new()
        .nest("/api", auth_router().merge(protected))
        .layer(from_fn(logging_middleware))
        .layer(cors)
        .layer(Extension(shared_db))
        .layer(Extension(config))
}
