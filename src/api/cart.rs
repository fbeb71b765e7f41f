use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use sea_orm::entity::prelude::{DateTimeUtc, Decimal};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::product::ProductResponse;
use crate::cart;
use crate::error::ShopError;
use crate::store::{self, CartItemRecord, CartRecord};

//ROUTERS
pub fn cart_router() -> Router {
    Router::new()
        .route(
            "/cart/user/:id",
            get(get_cart_by_user).post(create_cart_for_user),
        )
        .route("/cart/:id", get(get_cart).delete(delete_cart))
        .route("/cart/:id/items", get(get_cart_items).post(add_to_cart))
        .route(
            "/cart/items/:id",
            put(update_cart_item).delete(remove_cart_item),
        )
}

//ROUTES
async fn get_cart_by_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let record = cart::get_or_create_cart(&db, user_id).await?;

    Ok((StatusCode::OK, Json(CartResponse::from(record))).into_response())
}

async fn create_cart_for_user(
    Path(user_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let record = cart::create_cart_for_user(&db, user_id).await?;

    Ok((StatusCode::CREATED, Json(CartResponse::from(record))).into_response())
}

async fn get_cart(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let record = store::cart_with_items_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Cart"))?;

    Ok((StatusCode::OK, Json(CartResponse::from(record))).into_response())
}

async fn delete_cart(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let cart = store::cart_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Cart"))?;

    store::delete_cart(&*db, cart).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn add_to_cart(
    Path(cart_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<AddToCart>,
) -> Result<Response, ShopError> {
    let record = cart::add_item(&db, cart_id, payload.product_id, payload.quantity).await?;

    Ok((StatusCode::OK, Json(CartItemResponse::from(record))).into_response())
}

async fn get_cart_items(
    Path(cart_id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    if store::cart_by_id(&*db, cart_id).await?.is_none() {
        return Err(ShopError::NotFound("Cart"));
    }

    let items = store::items_by_cart(&*db, cart_id).await?;
    let response: Vec<CartItemResponse> =
        items.into_iter().map(CartItemResponse::from).collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn update_cart_item(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UpdateCartItem>,
) -> Result<Response, ShopError> {
    match cart::update_item(&db, id, payload.quantity).await? {
        Some(record) => Ok((StatusCode::OK, Json(CartItemResponse::from(record))).into_response()),
        // Quantity zero removed the row.
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn remove_cart_item(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    cart::remove_item(&db, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

//Structs
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct AddToCart {
    product_id: i32,
    quantity: i32,
}

#[derive(Deserialize, Clone, Debug)]
struct UpdateCartItem {
    quantity: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartResponse {
    id: i32,
    user_id: i32,
    created_at: DateTimeUtc,
    updated_at: DateTimeUtc,
    #[serde(with = "rust_decimal::serde::float")]
    total_amount: Decimal,
    items: Vec<CartItemResponse>,
}

impl From<CartRecord> for CartResponse {
    fn from(record: CartRecord) -> CartResponse {
        let total_amount = cart::total(&record.items);

        CartResponse {
            id: record.cart.id,
            user_id: record.cart.user_id,
            created_at: record.cart.created_at,
            updated_at: record.cart.updated_at,
            total_amount,
            items: record.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartItemResponse {
    id: i32,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
    added_at: DateTimeUtc,
    product: Option<ProductResponse>,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(record: CartItemRecord) -> CartItemResponse {
        CartItemResponse {
            id: record.item.id,
            cart_id: record.item.cart_id,
            product_id: record.item.product_id,
            quantity: record.item.quantity,
            added_at: record.item.added_at,
            product: record.product.map(ProductResponse::from),
        }
    }
}
