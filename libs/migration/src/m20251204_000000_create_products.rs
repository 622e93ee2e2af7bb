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
                    .col(string_len(Products::Description, 1000))
                    .col(integer(Products::Quantity).default(0))
                    .col(string_len(Products::CreatedBy, 256))
                    .col(timestamp_with_time_zone(Products::Created))
                    .col(string_len_null(Products::LastModifiedBy, 256))
                    .col(timestamp_with_time_zone_null(Products::LastModified))
                    .to_owned(),
            )
            .await?;

        // Names are unique regardless of case; the repository keys conflicts on this index name.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_products_name_lower ON products (LOWER(name))",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT ck_products_quantity_non_negative CHECK (quantity >= 0)
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_created")
                    .table(Products::Table)
                    .col(Products::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Quantity,
    CreatedBy,
    Created,
    LastModifiedBy,
    LastModified,
}
