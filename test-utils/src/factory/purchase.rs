//! Purchase factory for creating test purchase entities.

use chrono::{DateTime, Utc};
use entity::purchase::PurchaseStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test purchases of a course by a user.
pub struct PurchaseFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    course_id: i32,
    amount_cents: i64,
    currency: String,
    status: PurchaseStatus,
    provider_order_id: Option<String>,
    provider_capture_id: Option<String>,
    approval_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> PurchaseFactory<'a> {
    /// Defaults: `Pending`, 1999 USD cents, no provider references, created now.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, course_id: i32) -> Self {
        Self {
            db,
            user_id,
            course_id,
            amount_cents: 1999,
            currency: "USD".to_string(),
            status: PurchaseStatus::Pending,
            provider_order_id: None,
            provider_capture_id: None,
            approval_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn status(mut self, status: PurchaseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn provider_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.provider_order_id = Some(order_id.into());
        self
    }

    pub fn provider_capture_id(mut self, capture_id: impl Into<String>) -> Self {
        self.provider_capture_id = Some(capture_id.into());
        self
    }

    pub fn approval_url(mut self, approval_url: impl Into<String>) -> Self {
        self.approval_url = Some(approval_url.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::purchase::Model, DbErr> {
        let completed_at = match self.status {
            PurchaseStatus::Completed | PurchaseStatus::Refunded => Some(self.created_at),
            _ => None,
        };

        entity::purchase::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            course_id: ActiveValue::Set(self.course_id),
            amount_cents: ActiveValue::Set(self.amount_cents),
            currency: ActiveValue::Set(self.currency),
            status: ActiveValue::Set(self.status),
            provider_order_id: ActiveValue::Set(self.provider_order_id),
            provider_capture_id: ActiveValue::Set(self.provider_capture_id),
            approval_url: ActiveValue::Set(self.approval_url),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            completed_at: ActiveValue::Set(completed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending purchase with default values.
pub async fn create_purchase(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<entity::purchase::Model, DbErr> {
    PurchaseFactory::new(db, user_id, course_id).build().await
}
