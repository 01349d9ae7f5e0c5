use sea_orm_migration::{prelude::*, schema::*};

use super::m20260106_000004_create_course_table::Course;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(pk_auto(Section::Id))
                    .col(integer(Section::CourseId))
                    .col(string(Section::Title))
                    .col(integer(Section::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_course_id")
                            .from(Section::Table, Section::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Section {
    Table,
    Id,
    CourseId,
    Title,
    Position,
}
