use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::{notification, user};
use crate::store::carts::{cart_with_items_by_user, CartRecord};
use crate::store::notifications::notifications_by_user;

/// A user together with everything hanging off it: the cart (items and
/// products included) and the notification history.
pub struct UserRecord {
    pub user: user::Model,
    pub cart: Option<CartRecord>,
    pub notifications: Vec<notification::Model>,
}

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    hashed_password: &str,
) -> Result<user::Model, DbErr> {
    user::ActiveModel {
        username: Set(username.to_owned()),
        hashed_password: Set(hashed_password.to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn user_exists_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<bool, DbErr> {
    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(user.is_some())
}

pub async fn user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<UserRecord>, DbErr> {
    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    match user {
        Some(user) => Ok(Some(load_record(db, user).await?)),
        None => Ok(None),
    }
}

pub async fn user_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<UserRecord>, DbErr> {
    match user::Entity::find_by_id(id).one(db).await? {
        Some(user) => Ok(Some(load_record(db, user).await?)),
        None => Ok(None),
    }
}

pub async fn all_users<C: ConnectionTrait>(db: &C) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find().all(db).await
}

pub async fn update_user<C: ConnectionTrait>(
    db: &C,
    user: user::ActiveModel,
) -> Result<user::Model, DbErr> {
    user.update(db).await
}

pub async fn delete_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), DbErr> {
    user::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

async fn load_record<C: ConnectionTrait>(db: &C, user: user::Model) -> Result<UserRecord, DbErr> {
    let cart = cart_with_items_by_user(db, user.id).await?;
    let notifications = notifications_by_user(db, user.id).await?;

    Ok(UserRecord {
        user,
        cart,
        notifications,
    })
}
