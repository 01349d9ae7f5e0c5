use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_category_table::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoryClosure::Table)
                    .if_not_exists()
                    .col(integer(CategoryClosure::AncestorId))
                    .col(integer(CategoryClosure::DescendantId))
                    .col(integer(CategoryClosure::Depth))
                    .primary_key(
                        Index::create()
                            .col(CategoryClosure::AncestorId)
                            .col(CategoryClosure::DescendantId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_closure_ancestor_id")
                            .from(CategoryClosure::Table, CategoryClosure::AncestorId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_closure_descendant_id")
                            .from(CategoryClosure::Table, CategoryClosure::DescendantId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_category_closure_descendant_id")
                    .table(CategoryClosure::Table)
                    .col(CategoryClosure::DescendantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryClosure::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CategoryClosure {
    Table,
    AncestorId,
    DescendantId,
    Depth,
}
