use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::{default_entries, LinkDto, MAX_ENTRIES_PER_PAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatusDto {
    Pending,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub amount_cents: i64,
    /// Amount as a decimal string, e.g. `"19.99"`.
    pub amount: String,
    pub currency: String,
    pub status: PurchaseStatusDto,
    pub provider_order_id: Option<String>,
    pub approval_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedPurchasesDto {
    pub items: Vec<PurchaseDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Query for the admin purchase listing.
#[derive(Debug, Deserialize)]
pub struct PurchaseListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub status: Option<PurchaseStatusDto>,
}

impl PurchaseListParams {
    pub fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES_PER_PAGE)
    }
}
