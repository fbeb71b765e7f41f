use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use sea_orm::entity::prelude::DateTimeUtc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{self, AuthOutcome};
use crate::config::AppConfig;
use crate::entities::user;
use crate::error::ShopError;

//ROUTERS
pub fn auth_router() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

//ROUTES
async fn register(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<AppConfig>,
    Json(payload): Json<Credentials>,
) -> Result<Response, ShopError> {
    let outcome = auth::register(&db, &config.jwt, &payload.username, &payload.password).await?;

    Ok((StatusCode::OK, Json(AuthResponse::from(outcome))).into_response())
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<AppConfig>,
    Json(payload): Json<Credentials>,
) -> Result<Response, ShopError> {
    let outcome = auth::login(&db, &config.jwt, &payload.username, &payload.password).await?;

    Ok((StatusCode::OK, Json(AuthResponse::from(outcome))).into_response())
}

//Structs
#[derive(Deserialize, Clone, Debug)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    expires_at: DateTimeUtc,
    user: UserResponse,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> AuthResponse {
        AuthResponse {
            token: outcome.token,
            expires_at: outcome.expires_at,
            user: UserResponse::from(outcome.user),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    id: i32,
    username: String,
    created_at: DateTimeUtc,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> UserResponse {
        UserResponse {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}
