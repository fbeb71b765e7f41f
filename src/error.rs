use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Engine-level failure. Handlers return this and the single `IntoResponse`
/// impl below decides the status code, so business code never touches HTTP.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Insufficient stock")]
    InsufficientStock,
    #[error("Failed to hash password")]
    PasswordHash,
    #[error("Failed to generate token")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ShopError {
    pub fn validation(message: impl Into<String>) -> ShopError {
        ShopError::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ShopError::Validation(_) | ShopError::InsufficientStock => StatusCode::BAD_REQUEST,
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
            ShopError::PasswordHash | ShopError::Token(_) | ShopError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal failures keep their detail in the log, not the body.
        let message = match &self {
            ShopError::Db(err) => {
                tracing::error!("database error: {err}");
                "Internal server error".to_owned()
            }
            ShopError::Token(err) => {
                tracing::error!("token generation error: {err}");
                "Internal server error".to_owned()
            }
            ShopError::PasswordHash => {
                tracing::error!("password hashing failed");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
