use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    Set,
};

use crate::entities::{cart_item, product};
use crate::store::carts::touch_cart;

pub struct CartItemRecord {
    pub item: cart_item::Model,
    pub product: Option<product::Model>,
}

/// Inserts a row for `(cart_id, product_id)`, or increments the quantity of
/// the existing one. Either way the parent cart's `updated_at` is refreshed.
pub async fn add_or_merge_item<C: ConnectionTrait>(
    db: &C,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<cart_item::Model, DbErr> {
    let item = match item_by_cart_and_product(db, cart_id, product_id).await? {
        Some(existing) => {
            let combined = existing.item.quantity + quantity;
            let mut active: cart_item::ActiveModel = existing.item.into();
            active.quantity = Set(combined);
            active.update(db).await?
        }
        None => {
            cart_item::ActiveModel {
                cart_id: Set(cart_id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                added_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    touch_cart(db, cart_id).await?;

    Ok(item)
}

pub async fn item_by_cart_and_product<C: ConnectionTrait>(
    db: &C,
    cart_id: i32,
    product_id: i32,
) -> Result<Option<CartItemRecord>, DbErr> {
    let found = cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .find_also_related(product::Entity)
        .one(db)
        .await?;

    Ok(found.map(|(item, product)| CartItemRecord { item, product }))
}

pub async fn item_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<CartItemRecord>, DbErr> {
    let found = cart_item::Entity::find_by_id(id)
        .find_also_related(product::Entity)
        .one(db)
        .await?;

    Ok(found.map(|(item, product)| CartItemRecord { item, product }))
}

pub async fn update_item_quantity<C: ConnectionTrait>(
    db: &C,
    item: cart_item::Model,
    quantity: i32,
) -> Result<cart_item::Model, DbErr> {
    let cart_id = item.cart_id;

    let mut active: cart_item::ActiveModel = item.into();
    active.quantity = Set(quantity);
    let updated = active.update(db).await?;

    touch_cart(db, cart_id).await?;

    Ok(updated)
}

pub async fn remove_item<C: ConnectionTrait>(
    db: &C,
    item: cart_item::Model,
) -> Result<(), DbErr> {
    let cart_id = item.cart_id;

    item.delete(db).await?;
    touch_cart(db, cart_id).await?;

    Ok(())
}

pub async fn items_by_cart<C: ConnectionTrait>(
    db: &C,
    cart_id: i32,
) -> Result<Vec<CartItemRecord>, DbErr> {
    let rows = cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .find_also_related(product::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(item, product)| CartItemRecord { item, product })
        .collect())
}
