use sea_orm::entity::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    Set,
};

use crate::entities::product;

/// The writable fields of a product, shared by create and full update.
pub struct ProductChanges {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

pub async fn create_product<C: ConnectionTrait>(
    db: &C,
    changes: ProductChanges,
) -> Result<product::Model, DbErr> {
    product::ActiveModel {
        name: Set(changes.name),
        price: Set(changes.price),
        stock: Set(changes.stock),
        description: Set(changes.description),
        image_url: Set(changes.image_url),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn product_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id).one(db).await
}

pub async fn all_products<C: ConnectionTrait>(db: &C) -> Result<Vec<product::Model>, DbErr> {
    product::Entity::find().all(db).await
}

/// Substring match, not prefix: `name` may occur anywhere in the product name.
/// Case sensitivity follows the store collation.
pub async fn products_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Vec<product::Model>, DbErr> {
    product::Entity::find()
        .filter(product::Column::Name.contains(name))
        .all(db)
        .await
}

pub async fn update_product<C: ConnectionTrait>(
    db: &C,
    existing: product::Model,
    changes: ProductChanges,
) -> Result<product::Model, DbErr> {
    let mut active: product::ActiveModel = existing.into();
    active.name = Set(changes.name);
    active.price = Set(changes.price);
    active.stock = Set(changes.stock);
    active.description = Set(changes.description);
    active.image_url = Set(changes.image_url);

    active.update(db).await
}

pub async fn delete_product<C: ConnectionTrait>(
    db: &C,
    product: product::Model,
) -> Result<(), DbErr> {
    product.delete(db).await?;
    Ok(())
}
