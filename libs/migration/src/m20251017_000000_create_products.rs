use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string_len(Products::Name, 200))
                    .col(string_len(Products::Category, 100))
                    .col(string_len(Products::Brand, 100))
                    .col(
                        decimal_len(Products::Price, 10, 2)
                            .check(Expr::col(Products::Price).gt(0)),
                    )
                    .col(integer(Products::Quantity).check(Expr::col(Products::Quantity).gte(0)))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_products_category", Products::Category),
            ("idx_products_brand", Products::Brand),
            ("idx_products_price", Products::Price),
            ("idx_products_created_at", Products::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Products::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Products {
    Table,
    Id,
    Name,
    Category,
    Brand,
    Price,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
