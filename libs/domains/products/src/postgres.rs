use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    entity::{self, Column},
    error::{ProductError, ProductResult},
    models::{Product, UpdateProduct, to_money},
    pagination::PageWindow,
    query::{ProductOrder, ProductQuery, contains_pattern},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// `column ILIKE '%term%'` with LIKE metacharacters escaped
fn ilike(column: Column, term: &str) -> SimpleExpr {
    Expr::col(column).ilike(contains_pattern(term))
}

fn condition(query: &ProductQuery) -> Condition {
    let mut cond = Condition::all();

    if let Some(category) = &query.category {
        cond = cond.add(ilike(Column::Category, category));
    }
    if let Some(brand) = &query.brand {
        cond = cond.add(ilike(Column::Brand, brand));
    }
    if let Some(min) = query.price_min {
        cond = cond.add(Column::Price.gte(min));
    }
    if let Some(max) = query.price_max {
        cond = cond.add(Column::Price.lte(max));
    }
    if query.only_in_stock {
        cond = cond.add(Column::Quantity.gt(0));
    }

    cond
}

/// Apply `order`, then newest first and id descending for a stable result.
fn ordered(select: Select<entity::Entity>, order: ProductOrder) -> Select<entity::Entity> {
    let select = match order {
        ProductOrder::PriceAsc => select.order_by_asc(Column::Price),
        ProductOrder::PriceDesc => select.order_by_desc(Column::Price),
        ProductOrder::Name => select.order_by_asc(Column::Name),
        ProductOrder::CreatedDesc => select,
    };

    select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let model = self.base.insert(entity::ActiveModel::from(product)).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        // Supplied columns only; an unsupplied quantity is never written back.
        let mut update = entity::Entity::update_many().col_expr(
            Column::UpdatedAt,
            Expr::value(DateTimeWithTimeZone::from(Utc::now())),
        );
        if let Some(name) = input.name {
            update = update.col_expr(Column::Name, Expr::value(name));
        }
        if let Some(category) = input.category {
            update = update.col_expr(Column::Category, Expr::value(category));
        }
        if let Some(brand) = input.brand {
            update = update.col_expr(Column::Brand, Expr::value(brand));
        }
        if let Some(price) = input.price {
            update = update.col_expr(Column::Price, Expr::value(to_money(price)));
        }
        if let Some(quantity) = input.quantity {
            update = update.col_expr(Column::Quantity, Expr::value(quantity));
        }

        let updated = update
            .filter(Column::Id.eq(id))
            .exec_with_returning(self.base.db())
            .await?;

        let model = updated.into_iter().next().ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self, query: &ProductQuery, window: PageWindow) -> ProductResult<Vec<Product>> {
        let models = ordered(entity::Entity::find().filter(condition(query)), query.order)
            .offset(window.offset)
            .limit(window.limit)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, query: &ProductQuery) -> ProductResult<u64> {
        let total = entity::Entity::find()
            .filter(condition(query))
            .count(self.base.db())
            .await?;

        Ok(total)
    }

    async fn search(&self, term: &str, limit: u64) -> ProductResult<Vec<Product>> {
        let any_field = Condition::any()
            .add(ilike(Column::Name, term))
            .add(ilike(Column::Category, term))
            .add(ilike(Column::Brand, term));

        let models = ordered(entity::Entity::find().filter(any_field), ProductOrder::CreatedDesc)
            .limit(limit)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let models = ordered(
            entity::Entity::find().filter(ilike(Column::Category, category)),
            ProductOrder::CreatedDesc,
        )
        .all(self.base.db())
        .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_brand(&self, brand: &str) -> ProductResult<Vec<Product>> {
        let models = ordered(
            entity::Entity::find().filter(ilike(Column::Brand, brand)),
            ProductOrder::CreatedDesc,
        )
        .all(self.base.db())
        .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        let models = ordered(
            entity::Entity::find().filter(Column::Quantity.eq(0)),
            ProductOrder::CreatedDesc,
        )
        .all(self.base.db())
        .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn reduce_stock(&self, id: Uuid, amount: i64) -> ProductResult<Product> {
        // An amount beyond i32 can never be covered by the stock column.
        if let Ok(amount) = i32::try_from(amount) {
            // UPDATE products SET quantity = quantity - $n, updated_at = $now
            // WHERE id = $id AND quantity >= $n RETURNING *
            let updated = entity::Entity::update_many()
                .col_expr(Column::Quantity, Expr::col(Column::Quantity).sub(amount))
                .col_expr(
                    Column::UpdatedAt,
                    Expr::value(DateTimeWithTimeZone::from(Utc::now())),
                )
                .filter(Column::Id.eq(id))
                .filter(Column::Quantity.gte(amount))
                .exec_with_returning(self.base.db())
                .await?;

            if let Some(model) = updated.into_iter().next() {
                tracing::info!(
                    product_id = %id,
                    amount,
                    remaining = model.quantity,
                    "Reduced stock"
                );
                return Ok(model.into());
            }
        }

        // No row changed: either the id is unknown or the stock is short.
        match self.base.find_by_id(id).await? {
            None => Err(ProductError::NotFound(id)),
            Some(model) => Err(ProductError::InsufficientStock {
                available: model.quantity,
                requested: amount,
            }),
        }
    }
}
