use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::entity::prelude::DateTimeUtc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::notification::{self, NotificationStatus, NotificationType};
use crate::error::ShopError;
use crate::store;

//ROUTERS
pub fn notification_router() -> Router {
    Router::new()
        .route("/notification", post(create_notification))
        .route("/notification/user/:id", get(get_notifications_by_user))
        .route(
            "/notification/user/:id/unread",
            get(get_unread_notifications_by_user),
        )
        .route(
            "/notification/:id",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .route("/notification/:id/mark-read", put(mark_notification_read))
}

//ROUTES
async fn get_notifications_by_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let notifications = store::notifications_by_user(&*db, user_id).await?;

    let response: Vec<NotificationResponse> = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn get_unread_notifications_by_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let notifications = store::unread_notifications_by_user(&*db, user_id).await?;

    let response: Vec<NotificationResponse> = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn get_notification(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let notification = store::notification_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Notification"))?;

    Ok((StatusCode::OK, Json(NotificationResponse::from(notification))).into_response())
}

async fn create_notification(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateNotification>,
) -> Result<Response, ShopError> {
    // A missing target user is a bad request, not a missing resource.
    if store::user_by_id(&*db, payload.user_id).await?.is_none() {
        return Err(ShopError::validation("User not found"));
    }

    let created =
        store::create_notification(&*db, payload.user_id, payload.kind, &payload.message).await?;

    Ok((StatusCode::CREATED, Json(NotificationResponse::from(created))).into_response())
}

async fn update_notification(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UpdateNotification>,
) -> Result<Response, ShopError> {
    let notification = store::notification_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Notification"))?;

    let updated = store::update_notification_status(&*db, notification, payload.status).await?;

    Ok((StatusCode::OK, Json(NotificationResponse::from(updated))).into_response())
}

async fn mark_notification_read(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let notification = store::notification_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Notification"))?;

    let updated = store::mark_notification_read(&*db, notification).await?;

    Ok((StatusCode::OK, Json(NotificationResponse::from(updated))).into_response())
}

async fn delete_notification(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let notification = store::notification_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Notification"))?;

    store::delete_notification(&*db, notification).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

//Structs
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateNotification {
    user_id: i32,
    #[serde(rename = "type")]
    kind: NotificationType,
    message: String,
}

#[derive(Deserialize, Clone, Debug)]
struct UpdateNotification {
    status: NotificationStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationResponse {
    id: i32,
    user_id: i32,
    #[serde(rename = "type")]
    kind: NotificationType,
    message: String,
    status: NotificationStatus,
    created_at: DateTimeUtc,
    processed_at: Option<DateTimeUtc>,
}

impl From<notification::Model> for NotificationResponse {
    fn from(value: notification::Model) -> NotificationResponse {
        NotificationResponse {
            id: value.id,
            user_id: value.user_id,
            kind: value.kind,
            message: value.message,
            status: value.status,
            created_at: value.created_at,
            processed_at: value.processed_at,
        }
    }
}
