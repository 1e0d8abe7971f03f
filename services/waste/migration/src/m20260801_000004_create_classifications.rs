use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classifications::ImageId).uuid().not_null())
                    .col(ColumnDef::new(Classifications::Result).string().not_null())
                    .col(
                        ColumnDef::new(Classifications::Confidence)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classifications::WasteCount).integer())
                    .col(
                        ColumnDef::new(Classifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classifications::Table, Classifications::ImageId)
                            .to(SubmissionImages::Table, SubmissionImages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One result per image, enforced by the database.
        manager
            .create_index(
                Index::create()
                    .name("idx_classifications_image_id")
                    .table(Classifications::Table)
                    .col(Classifications::ImageId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Classifications {
    Table,
    Id,
    ImageId,
    Result,
    Confidence,
    WasteCount,
    CreatedAt,
}

#[derive(Iden)]
enum SubmissionImages {
    Table,
    Id,
}
