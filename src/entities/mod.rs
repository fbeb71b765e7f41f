pub mod cart;
pub mod cart_item;
pub mod notification;
pub mod product;
pub mod user;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Schema, Set};
use sea_orm::entity::prelude::Decimal;

use crate::entities::{
    cart::Entity as Cart,
    cart_item::Entity as CartItem,
    notification::Entity as Notification,
    product::Entity as Product,
    user::Entity as User,
};

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Referenced tables first, so the foreign keys resolve.
    let mut create_user_table = schema.create_table_from_entity(User);
    let mut create_product_table = schema.create_table_from_entity(Product);
    let mut create_cart_table = schema.create_table_from_entity(Cart);
    let mut create_cart_item_table = schema.create_table_from_entity(CartItem);
    let mut create_notification_table = schema.create_table_from_entity(Notification);

    db.execute(backend.build(create_user_table.if_not_exists())).await?;
    db.execute(backend.build(create_product_table.if_not_exists())).await?;
    db.execute(backend.build(create_cart_table.if_not_exists())).await?;
    db.execute(backend.build(create_cart_item_table.if_not_exists())).await?;
    db.execute(backend.build(create_notification_table.if_not_exists())).await?;

    // One row per (cart, product) pair, re-adds merge instead of duplicating.
    let mut cart_item_unique = Index::create()
        .name("idx_cart_items_cart_id_product_id")
        .table(CartItem)
        .col(cart_item::Column::CartId)
        .col(cart_item::Column::ProductId)
        .unique()
        .to_owned();
    db.execute(backend.build(cart_item_unique.if_not_exists())).await?;

    Ok(())
}

pub async fn seed_products(db: &DatabaseConnection, image_base_url: &str) -> Result<(), DbErr> {
    if Product::find().count(db).await? > 0 {
        return Ok(());
    }

    let catalog: [(&str, i64, i32, &str, &str); 15] = [
        (
            "Laptop Pro 15\"",
            1299_99,
            25,
            "High-performance laptop with 15-inch display, perfect for professionals and power users.",
            "Laptop+Pro+15",
        ),
        (
            "Wireless Headphones",
            199_99,
            50,
            "Premium noise-cancelling wireless headphones with 30-hour battery life.",
            "Wireless+Headphones",
        ),
        (
            "Smartphone X",
            799_99,
            30,
            "Latest generation smartphone with advanced camera system and all-day battery.",
            "Smartphone+X",
        ),
        (
            "Gaming Mouse",
            79_99,
            100,
            "Precision gaming mouse with customizable RGB lighting and programmable buttons.",
            "Gaming+Mouse",
        ),
        (
            "4K Monitor",
            399_99,
            20,
            "27-inch 4K UHD monitor with HDR support and ultra-thin bezels.",
            "4K+Monitor",
        ),
        (
            "Mechanical Keyboard",
            149_99,
            35,
            "Premium mechanical keyboard with tactile switches and customizable backlighting.",
            "Mechanical+Keyboard",
        ),
        (
            "Tablet 10\"",
            499_99,
            40,
            "Lightweight 10-inch tablet perfect for productivity and entertainment on the go.",
            "Tablet+10",
        ),
        (
            "Smart Watch",
            299_99,
            60,
            "Advanced smartwatch with health tracking, GPS, and week-long battery life.",
            "Smart+Watch",
        ),
        (
            "Bluetooth Speaker",
            89_99,
            75,
            "Portable Bluetooth speaker with 360-degree sound and waterproof design.",
            "Bluetooth+Speaker",
        ),
        (
            "USB-C Hub",
            49_99,
            120,
            "Multi-port USB-C hub with 4K HDMI, USB 3.0, and fast charging support.",
            "USB-C+Hub",
        ),
        (
            "Webcam HD",
            69_99,
            80,
            "1080p HD webcam with auto-focus and built-in noise-cancelling microphone.",
            "Webcam+HD",
        ),
        (
            "Power Bank",
            39_99,
            90,
            "High-capacity power bank with fast charging and multiple device support.",
            "Power+Bank",
        ),
        (
            "Desk Lamp LED",
            59_99,
            45,
            "Adjustable LED desk lamp with touch controls and multiple brightness levels.",
            "Desk+Lamp+LED",
        ),
        (
            "Phone Case",
            24_99,
            200,
            "Durable phone case with military-grade protection and wireless charging support.",
            "Phone+Case",
        ),
        (
            "Ergonomic Chair",
            299_99,
            15,
            "Ergonomic office chair with lumbar support and adjustable height.",
            "Ergonomic+Chair",
        ),
    ];

    let products = catalog.map(|(name, cents, stock, description, image)| product::ActiveModel {
        name: Set(name.to_owned()),
        price: Set(Decimal::new(cents, 2)),
        stock: Set(stock),
        description: Set(Some(description.to_owned())),
        image_url: Set(Some(format!("{image_base_url}/400x300?text={image}"))),
        ..Default::default()
    });

    Product::insert_many(products).exec(db).await?;

    Ok(())
}
