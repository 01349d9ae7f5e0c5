//! Purchase fixtures for creating in-memory test data.

use chrono::Utc;
use entity::purchase::{self, PurchaseStatus};

/// Creates a pending purchase entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - user_id: `1`, course_id: `1`
/// - amount: `1999` USD cents
/// - status: `Pending`
pub fn entity() -> purchase::Model {
    entity_builder().build()
}

/// Creates a purchase entity builder for customization.
pub fn entity_builder() -> PurchaseEntityBuilder {
    PurchaseEntityBuilder::default()
}

/// Builder for creating customized purchase entity models.
pub struct PurchaseEntityBuilder {
    id: i32,
    user_id: i32,
    course_id: i32,
    amount_cents: i64,
    status: PurchaseStatus,
    provider_order_id: Option<String>,
    approval_url: Option<String>,
}

impl Default for PurchaseEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            user_id: 1,
            course_id: 1,
            amount_cents: 1999,
            status: PurchaseStatus::Pending,
            provider_order_id: None,
            approval_url: None,
        }
    }
}

impl PurchaseEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn course_id(mut self, course_id: i32) -> Self {
        self.course_id = course_id;
        self
    }

    pub fn amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
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

    pub fn approval_url(mut self, approval_url: impl Into<String>) -> Self {
        self.approval_url = Some(approval_url.into());
        self
    }

    /// Builds and returns the purchase entity model.
    pub fn build(self) -> purchase::Model {
        let now = Utc::now();
        purchase::Model {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            amount_cents: self.amount_cents,
            currency: "USD".to_string(),
            status: self.status,
            provider_order_id: self.provider_order_id,
            provider_capture_id: None,
            approval_url: self.approval_url,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
