use sea_orm_migration::{prelude::*, schema::*};

use super::m20260112_000007_create_purchase_table::Purchase;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentEvent::Id))
                    .col(string_uniq(PaymentEvent::ProviderEventId))
                    .col(string(PaymentEvent::EventType))
                    .col(string_null(PaymentEvent::ResourceId))
                    .col(integer_null(PaymentEvent::PurchaseId))
                    .col(string_len(PaymentEvent::Outcome, 16))
                    .col(text(PaymentEvent::Payload))
                    .col(
                        timestamp_with_time_zone(PaymentEvent::ReceivedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_event_purchase_id")
                            .from(PaymentEvent::Table, PaymentEvent::PurchaseId)
                            .to(Purchase::Table, Purchase::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentEvent {
    Table,
    Id,
    ProviderEventId,
    EventType,
    ResourceId,
    PurchaseId,
    Outcome,
    Payload,
    ReceivedAt,
}
