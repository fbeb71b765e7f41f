//! Persistence gateway. Thin, record-shaped operations over the entities;
//! a missing row is `Ok(None)`, a storage fault is `Err(DbErr)`. Callers
//! decide what "missing" means for them. Everything is generic over
//! `ConnectionTrait` so the cart engine can run these inside a transaction.

mod cart_items;
mod carts;
mod notifications;
mod products;
mod users;

pub use cart_items::{
    add_or_merge_item, item_by_cart_and_product, item_by_id, items_by_cart, remove_item,
    update_item_quantity, CartItemRecord,
};
pub use carts::{
    cart_by_id, cart_with_items_by_id, cart_with_items_by_user, create_cart, delete_cart,
    touch_cart, CartRecord,
};
pub use notifications::{
    create_notification, delete_notification, mark_notification_read, notification_by_id,
    notifications_by_user, unread_notifications_by_user, update_notification_status,
};
pub use products::{
    all_products, create_product, delete_product, product_by_id, products_by_name, update_product,
    ProductChanges,
};
pub use users::{
    all_users, create_user, delete_user, update_user, user_by_id, user_by_username,
    user_exists_by_username, UserRecord,
};
