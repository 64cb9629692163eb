use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub brand: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// OpenAPI tag shared by every product endpoint
    pub const TAG: &'static str = "products";
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            brand: model.brand,
            price: model.price,
            quantity: model.quantity,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            category: Set(product.category),
            brand: Set(product.brand),
            price: Set(product.price),
            quantity: Set(product.quantity),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use std::str::FromStr;

    #[test]
    fn test_model_round_trips_through_domain() {
        let product = Product::new(CreateProduct {
            name: "Desk".into(),
            category: "Furniture".into(),
            brand: "Oak & Co".into(),
            price: Decimal::from_str("249.5").unwrap(),
            quantity: 3,
        });

        let model = Model {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            price: product.price,
            quantity: product.quantity,
            created_at: product.created_at.into(),
            updated_at: product.updated_at.into(),
        };

        assert_eq!(Product::from(model), product);
    }
}
