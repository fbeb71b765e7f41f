use sea_orm::entity::prelude::*;
use crate::entities::cart::Entity as Cart;
use crate::entities::notification::Entity as Notification;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "Cart")]
    Cart,
    #[sea_orm(has_many = "Notification")]
    Notification,
}

impl Related<Cart> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<Notification> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
