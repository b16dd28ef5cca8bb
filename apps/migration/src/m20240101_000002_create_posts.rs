use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Title and text are unbounded; the form enforces only that they are present.
fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
        .col(ColumnDef::new(Posts::Title).text().not_null())
        .col(ColumnDef::new(Posts::Text).text().not_null())
        .col(
            ColumnDef::new(Posts::CreatedDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Posts::PublishedDate)
                .timestamp_with_time_zone()
                .null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_author_id")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;

        // Listing filters and sorts on the publish date.
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_published_date")
                    .table(Posts::Table)
                    .col(Posts::PublishedDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Title,
    Text,
    CreatedDate,
    PublishedDate,
}
