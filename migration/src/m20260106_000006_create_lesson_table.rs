use sea_orm_migration::{prelude::*, schema::*};

use super::m20260106_000005_create_section_table::Section;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(pk_auto(Lesson::Id))
                    .col(integer(Lesson::SectionId))
                    .col(string(Lesson::Title))
                    .col(text(Lesson::Content))
                    .col(string_null(Lesson::VideoUrl))
                    .col(integer_null(Lesson::DurationSeconds))
                    .col(boolean(Lesson::IsPreview).default(false))
                    .col(integer(Lesson::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_section_id")
                            .from(Lesson::Table, Lesson::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lesson {
    Table,
    Id,
    SectionId,
    Title,
    Content,
    VideoUrl,
    DurationSeconds,
    IsPreview,
    Position,
}
