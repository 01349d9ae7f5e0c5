use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260106_000004_create_course_table::Course,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchase::Table)
                    .if_not_exists()
                    .col(pk_auto(Purchase::Id))
                    .col(integer(Purchase::UserId))
                    .col(integer(Purchase::CourseId))
                    .col(big_integer(Purchase::AmountCents))
                    .col(string_len(Purchase::Currency, 3))
                    .col(string_len(Purchase::Status, 16).default("pending"))
                    .col(string_null(Purchase::ProviderOrderId).unique_key())
                    .col(string_null(Purchase::ProviderCaptureId))
                    .col(string_null(Purchase::ApprovalUrl))
                    .col(
                        timestamp_with_time_zone(Purchase::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Purchase::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Purchase::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_user_id")
                            .from(Purchase::Table, Purchase::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_course_id")
                            .from(Purchase::Table, Purchase::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_user_course")
                    .table(Purchase::Table)
                    .col(Purchase::UserId)
                    .col(Purchase::CourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Purchase {
    Table,
    Id,
    UserId,
    CourseId,
    AmountCents,
    Currency,
    Status,
    ProviderOrderId,
    ProviderCaptureId,
    ApprovalUrl,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}
