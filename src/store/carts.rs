use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    Set,
};

use crate::entities::cart;
use crate::store::cart_items::{items_by_cart, CartItemRecord};

/// A cart with its items, each item carrying its product so totals can be
/// computed without further round trips.
pub struct CartRecord {
    pub cart: cart::Model,
    pub items: Vec<CartItemRecord>,
}

pub async fn create_cart<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<cart::Model, DbErr> {
    let now = Utc::now();

    cart::ActiveModel {
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn cart_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<cart::Model>, DbErr> {
    cart::Entity::find_by_id(id).one(db).await
}

pub async fn cart_with_items_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<CartRecord>, DbErr> {
    let cart = cart::Entity::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match cart {
        Some(cart) => {
            let items = items_by_cart(db, cart.id).await?;
            Ok(Some(CartRecord { cart, items }))
        }
        None => Ok(None),
    }
}

pub async fn cart_with_items_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<CartRecord>, DbErr> {
    match cart_by_id(db, id).await? {
        Some(cart) => {
            let items = items_by_cart(db, cart.id).await?;
            Ok(Some(CartRecord { cart, items }))
        }
        None => Ok(None),
    }
}

/// Refreshes the cart's `updated_at`. Every item mutation goes through this,
/// so the timestamp never lags behind the items. Missing carts are skipped.
pub async fn touch_cart<C: ConnectionTrait>(db: &C, cart_id: i32) -> Result<(), DbErr> {
    if let Some(cart) = cart_by_id(db, cart_id).await? {
        let mut active: cart::ActiveModel = cart.into();
        active.updated_at = Set(Utc::now());
        active.update(db).await?;
    }

    Ok(())
}

pub async fn delete_cart<C: ConnectionTrait>(db: &C, cart: cart::Model) -> Result<(), DbErr> {
    cart.delete(db).await?;
    Ok(())
}
