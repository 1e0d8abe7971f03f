use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubmissionImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubmissionImages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubmissionImages::SubmissionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionImages::ImageUrl)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionImages::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(SubmissionImages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubmissionImages::Table, SubmissionImages::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_images_submission_id")
                    .table(SubmissionImages::Table)
                    .col(SubmissionImages::SubmissionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubmissionImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SubmissionImages {
    Table,
    Id,
    SubmissionId,
    ImageUrl,
    Status,
    UpdatedAt,
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
}
