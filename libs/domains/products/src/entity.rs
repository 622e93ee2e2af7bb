use sea_orm::entity::prelude::*;

use crate::audit::{AuditInfo, Audited};
use crate::models::Product;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub created_by: String,
    pub created: DateTimeWithTimeZone,
    pub last_modified_by: Option<String>,
    pub last_modified: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Audited<Product> {
    fn from(model: Model) -> Self {
        Audited::new(
            Product::rehydrate(model.id, model.name, model.description, model.quantity),
            AuditInfo {
                created: model.created.into(),
                created_by: model.created_by,
                last_modified: model.last_modified.map(Into::into),
                last_modified_by: model.last_modified_by,
            },
        )
    }
}
