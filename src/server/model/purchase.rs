//! Purchase domain models, parameters and the status transition table.

use chrono::{DateTime, Utc};
use entity::purchase::PurchaseStatus;

use crate::{
    model::purchase::{PaginatedPurchasesDto, PurchaseDto, PurchaseStatusDto},
    server::{
        middleware::ability::{Ability, Subject},
        util::{links, money},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PurchaseStatus,
    pub provider_order_id: Option<String>,
    pub provider_capture_id: Option<String>,
    pub approval_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Purchase {
    pub fn from_entity(entity: entity::purchase::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            amount_cents: entity.amount_cents,
            currency: entity.currency,
            status: entity.status,
            provider_order_id: entity.provider_order_id,
            provider_capture_id: entity.provider_capture_id,
            approval_url: entity.approval_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            completed_at: entity.completed_at,
        }
    }

    pub fn subject(&self) -> Subject {
        Subject::Purchase {
            buyer_id: self.user_id,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PurchaseStatus::Pending
    }

    pub fn into_dto(self, ability: &Ability) -> PurchaseDto {
        PurchaseDto {
            links: links::purchase_links(&self, ability),
            amount: money::format_amount(self.amount_cents),
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            amount_cents: self.amount_cents,
            currency: self.currency,
            status: self.status.into(),
            provider_order_id: self.provider_order_id,
            approval_url: self.approval_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedPurchases {
    pub purchases: Vec<Purchase>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedPurchases {
    pub fn into_dto(self, ability: &Ability) -> PaginatedPurchasesDto {
        PaginatedPurchasesDto {
            items: self
                .purchases
                .into_iter()
                .map(|purchase| purchase.into_dto(ability))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePurchaseParams {
    pub user_id: i32,
    pub course_id: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PurchaseStatus,
}

/// Result of checking a requested status change against the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The purchase already has the requested status.
    Unchanged,
    Allowed,
    Rejected,
}

/// Checks a status change against the allowed transitions.
///
/// Allowed: Pending → Completed, Pending → Failed, Pending → Cancelled and
/// Completed → Refunded.
pub fn check_transition(from: PurchaseStatus, to: PurchaseStatus) -> StatusChange {
    use PurchaseStatus::*;

    if from == to {
        return StatusChange::Unchanged;
    }

    match (from, to) {
        (Pending, Completed) | (Pending, Failed) | (Pending, Cancelled) | (Completed, Refunded) => {
            StatusChange::Allowed
        }
        _ => StatusChange::Rejected,
    }
}

impl From<PurchaseStatus> for PurchaseStatusDto {
    fn from(status: PurchaseStatus) -> Self {
        match status {
            PurchaseStatus::Pending => PurchaseStatusDto::Pending,
            PurchaseStatus::Completed => PurchaseStatusDto::Completed,
            PurchaseStatus::Failed => PurchaseStatusDto::Failed,
            PurchaseStatus::Cancelled => PurchaseStatusDto::Cancelled,
            PurchaseStatus::Refunded => PurchaseStatusDto::Refunded,
        }
    }
}

impl From<PurchaseStatusDto> for PurchaseStatus {
    fn from(status: PurchaseStatusDto) -> Self {
        match status {
            PurchaseStatusDto::Pending => PurchaseStatus::Pending,
            PurchaseStatusDto::Completed => PurchaseStatus::Completed,
            PurchaseStatusDto::Failed => PurchaseStatus::Failed,
            PurchaseStatusDto::Cancelled => PurchaseStatus::Cancelled,
            PurchaseStatusDto::Refunded => PurchaseStatus::Refunded,
        }
    }
}
