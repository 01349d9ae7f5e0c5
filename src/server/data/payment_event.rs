use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::payment::{ClaimPaymentEventParams, PaymentEvent, WebhookOutcome};

/// Outcome stored while a claimed event is being processed.
pub const PROCESSING_OUTCOME: &str = "processing";

pub struct PaymentEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Claims a provider event id before the event is processed.
    ///
    /// The event is stored with the `processing` outcome. Concurrent deliveries of the
    /// same event race on the unique event id and only one of them wins.
    ///
    /// # Arguments
    /// - `params` - Event identity, resource id and raw payload
    ///
    /// # Returns
    /// - `Ok(true)` - Event claimed by this caller
    /// - `Ok(false)` - Event id was claimed or recorded before
    /// - `Err(DbErr)` - Database error during insert
    pub async fn claim(&self, params: ClaimPaymentEventParams) -> Result<bool, DbErr> {
        let entity = entity::payment_event::ActiveModel {
            provider_event_id: ActiveValue::Set(params.provider_event_id),
            event_type: ActiveValue::Set(params.event_type),
            resource_id: ActiveValue::Set(params.resource_id),
            purchase_id: ActiveValue::Set(None),
            outcome: ActiveValue::Set(PROCESSING_OUTCOME.to_string()),
            payload: ActiveValue::Set(params.payload),
            received_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        let inserted = entity::prelude::PaymentEvent::insert(entity)
            .on_conflict(
                OnConflict::column(entity::payment_event::Column::ProviderEventId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(inserted > 0)
    }

    /// Stores the purchase and outcome of a claimed event.
    ///
    /// # Returns
    /// - `Ok(true)` - Event updated
    /// - `Ok(false)` - Event id was never claimed
    /// - `Err(DbErr)` - Database error during update
    pub async fn finish(
        &self,
        provider_event_id: &str,
        purchase_id: Option<i32>,
        outcome: WebhookOutcome,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::PaymentEvent::update_many()
            .col_expr(
                entity::payment_event::Column::PurchaseId,
                Expr::value(purchase_id),
            )
            .col_expr(
                entity::payment_event::Column::Outcome,
                Expr::value(outcome.as_str()),
            )
            .filter(entity::payment_event::Column::ProviderEventId.eq(provider_event_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Drops a claim whose processing failed so the provider's retry is handled again.
    pub async fn release(&self, provider_event_id: &str) -> Result<(), DbErr> {
        entity::prelude::PaymentEvent::delete_many()
            .filter(entity::payment_event::Column::ProviderEventId.eq(provider_event_id))
            .filter(entity::payment_event::Column::Outcome.eq(PROCESSING_OUTCOME))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn find_by_event_id(
        &self,
        provider_event_id: &str,
    ) -> Result<Option<PaymentEvent>, DbErr> {
        let entity = entity::prelude::PaymentEvent::find()
            .filter(entity::payment_event::Column::ProviderEventId.eq(provider_event_id))
            .one(self.db)
            .await?;

        Ok(entity.map(PaymentEvent::from_entity))
    }
}
