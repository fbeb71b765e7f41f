use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::notification::{self, NotificationStatus, NotificationType};

pub async fn create_notification<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    kind: NotificationType,
    message: &str,
) -> Result<notification::Model, DbErr> {
    notification::ActiveModel {
        user_id: Set(user_id),
        kind: Set(kind),
        message: Set(message.to_owned()),
        status: Set(NotificationStatus::Pending),
        created_at: Set(Utc::now()),
        processed_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn notification_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<notification::Model>, DbErr> {
    notification::Entity::find_by_id(id).one(db).await
}

pub async fn notifications_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<notification::Model>, DbErr> {
    notification::Entity::find()
        .filter(notification::Column::UserId.eq(user_id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn unread_notifications_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<notification::Model>, DbErr> {
    notification::Entity::find()
        .filter(notification::Column::UserId.eq(user_id))
        .filter(notification::Column::Status.ne(NotificationStatus::Read))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await
}

/// Sets the status; moving to `read` also stamps `processed_at`.
pub async fn update_notification_status<C: ConnectionTrait>(
    db: &C,
    notification: notification::Model,
    status: NotificationStatus,
) -> Result<notification::Model, DbErr> {
    let mut active: notification::ActiveModel = notification.into();
    active.status = Set(status);
    if status == NotificationStatus::Read {
        active.processed_at = Set(Some(Utc::now()));
    }

    active.update(db).await
}

pub async fn mark_notification_read<C: ConnectionTrait>(
    db: &C,
    notification: notification::Model,
) -> Result<notification::Model, DbErr> {
    update_notification_status(db, notification, NotificationStatus::Read).await
}

pub async fn delete_notification<C: ConnectionTrait>(
    db: &C,
    notification: notification::Model,
) -> Result<(), DbErr> {
    notification.delete(db).await?;
    Ok(())
}
