//! Cart rules: merge-on-add, stock checks against the combined quantity,
//! removal at zero, and live totals. Every mutation runs inside one
//! transaction so the item write and the cart timestamp commit together.

use sea_orm::entity::prelude::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::error::ShopError;
use crate::store::{self, CartItemRecord, CartRecord};

/// Returns the user's cart, creating an empty one on first access.
pub async fn get_or_create_cart(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<CartRecord, ShopError> {
    let txn = db.begin().await?;

    let record = match store::cart_with_items_by_user(&txn, user_id).await? {
        Some(record) => record,
        None => {
            ensure_user_exists(&txn, user_id).await?;
            let cart = store::create_cart(&txn, user_id).await?;
            CartRecord {
                cart,
                items: Vec::new(),
            }
        }
    };

    txn.commit().await?;

    Ok(record)
}

/// Explicit cart creation. A user owns at most one cart.
pub async fn create_cart_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<CartRecord, ShopError> {
    let txn = db.begin().await?;

    if store::cart_with_items_by_user(&txn, user_id).await?.is_some() {
        return Err(ShopError::validation("User already has a cart"));
    }
    ensure_user_exists(&txn, user_id).await?;

    let cart = store::create_cart(&txn, user_id).await?;
    txn.commit().await?;

    Ok(CartRecord {
        cart,
        items: Vec::new(),
    })
}

/// Adds a product to the cart, merging into an existing row for the same
/// product. Stock must cover the combined quantity, not just the increment.
pub async fn add_item(
    db: &DatabaseConnection,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<CartItemRecord, ShopError> {
    if quantity < 1 {
        return Err(ShopError::validation("Quantity must be at least 1"));
    }

    let txn = db.begin().await?;

    if store::cart_by_id(&txn, cart_id).await?.is_none() {
        return Err(ShopError::NotFound("Cart"));
    }
    let product = store::product_by_id(&txn, product_id)
        .await?
        .ok_or(ShopError::NotFound("Product"))?;

    let existing = store::item_by_cart_and_product(&txn, cart_id, product_id).await?;
    let combined = match &existing {
        Some(record) => record.item.quantity + quantity,
        None => quantity,
    };
    if product.stock < combined {
        return Err(ShopError::InsufficientStock);
    }

    let item = store::add_or_merge_item(&txn, cart_id, product_id, quantity).await?;
    txn.commit().await?;

    Ok(CartItemRecord {
        item,
        product: Some(product),
    })
}

/// Sets an item's quantity. Zero removes the row (`Ok(None)`); anything else
/// must be covered by the product's stock.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i32,
    quantity: i32,
) -> Result<Option<CartItemRecord>, ShopError> {
    if quantity < 0 {
        return Err(ShopError::validation("Quantity must be at least 1"));
    }

    let txn = db.begin().await?;

    let record = store::item_by_id(&txn, item_id)
        .await?
        .ok_or(ShopError::NotFound("Cart item"))?;

    if quantity == 0 {
        store::remove_item(&txn, record.item).await?;
        txn.commit().await?;
        return Ok(None);
    }

    let product = store::product_by_id(&txn, record.item.product_id)
        .await?
        .ok_or(ShopError::NotFound("Product"))?;
    if product.stock < quantity {
        return Err(ShopError::InsufficientStock);
    }

    let item = store::update_item_quantity(&txn, record.item, quantity).await?;
    txn.commit().await?;

    Ok(Some(CartItemRecord {
        item,
        product: Some(product),
    }))
}

/// Removing an item that is already gone is a no-op, not an error.
pub async fn remove_item(db: &DatabaseConnection, item_id: i32) -> Result<(), ShopError> {
    let txn = db.begin().await?;

    if let Some(record) = store::item_by_id(&txn, item_id).await? {
        store::remove_item(&txn, record.item).await?;
    }

    txn.commit().await?;

    Ok(())
}

async fn ensure_user_exists<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), ShopError> {
    if store::user_by_id(db, user_id).await?.is_none() {
        return Err(ShopError::validation("User not found"));
    }

    Ok(())
}

/// Live total, never cached: sum of quantity times current product price.
pub fn total(items: &[CartItemRecord]) -> Decimal {
    items
        .iter()
        .map(|record| match &record.product {
            Some(product) => Decimal::from(record.item.quantity) * product.price,
            None => Decimal::ZERO,
        })
        .sum()
}
