use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::entity::prelude::Decimal;
use sea_orm::{DatabaseConnection, SqlErr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::product;
use crate::error::ShopError;
use crate::store::{self, ProductChanges};

//ROUTERS
pub fn product_router() -> Router {
    Router::new()
        .route("/product", get(get_products).post(create_product))
        .route("/product/search", get(search_products))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

//ROUTES
async fn get_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let products = store::all_products(&*db).await?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let product = store::product_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Product"))?;

    Ok((StatusCode::OK, Json(ProductResponse::from(product))).into_response())
}

async fn search_products(
    Query(params): Query<SearchQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let products = store::products_by_name(&*db, &params.name).await?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<ProductPayload>,
) -> Result<Response, ShopError> {
    let changes = payload.into_changes()?;
    let created = store::create_product(&*db, changes).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(created))).into_response())
}

async fn update_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<ProductPayload>,
) -> Result<Response, ShopError> {
    let existing = store::product_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Product"))?;

    let changes = payload.into_changes()?;
    let updated = store::update_product(&*db, existing, changes).await?;

    Ok((StatusCode::OK, Json(ProductResponse::from(updated))).into_response())
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ShopError> {
    let product = store::product_by_id(&*db, id)
        .await?
        .ok_or(ShopError::NotFound("Product"))?;

    // Products sitting in a cart are restrict-delete.
    if let Err(err) = store::delete_product(&*db, product).await {
        return Err(match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                ShopError::validation("Product is still referenced by a cart")
            }
            _ => ShopError::Db(err),
        });
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

//Structs
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct ProductPayload {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    stock: i32,
    description: Option<String>,
    image_url: Option<String>,
}

impl ProductPayload {
    fn into_changes(self) -> Result<ProductChanges, ShopError> {
        if self.name.trim().is_empty() {
            return Err(ShopError::validation("Product name is required"));
        }
        if self.price < Decimal::ZERO {
            return Err(ShopError::validation("Price must not be negative"));
        }
        if self.stock < 0 {
            return Err(ShopError::validation("Stock must not be negative"));
        }

        Ok(ProductChanges {
            name: self.name,
            price: self.price,
            stock: self.stock,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<product::Model> for ProductResponse {
    fn from(value: product::Model) -> ProductResponse {
        ProductResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            stock: value.stock,
            description: value.description,
            image_url: value.image_url,
        }
    }
}
