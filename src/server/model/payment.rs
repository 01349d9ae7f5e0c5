//! Payment provider webhook domain models.

use chrono::{DateTime, Utc};

use crate::model::webhook::{WebhookAckDto, WebhookOutcomeDto};

/// What processing a webhook event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The event changed a purchase.
    Applied,
    /// The event id was processed before.
    Duplicate,
    /// The event type is not handled.
    Ignored,
    /// The event conflicts with the purchase (amount mismatch, invalid transition).
    Rejected,
    /// No purchase matches the event resource.
    Unmatched,
}

impl WebhookOutcome {
    /// Value stored in the `payment_event.outcome` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Duplicate => "duplicate",
            Self::Ignored => "ignored",
            Self::Rejected => "rejected",
            Self::Unmatched => "unmatched",
        }
    }

    pub fn into_dto(self) -> WebhookOutcomeDto {
        match self {
            Self::Applied => WebhookOutcomeDto::Applied,
            Self::Duplicate => WebhookOutcomeDto::Duplicate,
            Self::Ignored => WebhookOutcomeDto::Ignored,
            Self::Rejected => WebhookOutcomeDto::Rejected,
            Self::Unmatched => WebhookOutcomeDto::Unmatched,
        }
    }
}

/// Stored webhook event.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEvent {
    pub id: i32,
    pub provider_event_id: String,
    pub event_type: String,
    pub resource_id: Option<String>,
    pub purchase_id: Option<i32>,
    pub outcome: String,
    pub payload: String,
    pub received_at: DateTime<Utc>,
}

impl PaymentEvent {
    pub fn from_entity(entity: entity::payment_event::Model) -> Self {
        Self {
            id: entity.id,
            provider_event_id: entity.provider_event_id,
            event_type: entity.event_type,
            resource_id: entity.resource_id,
            purchase_id: entity.purchase_id,
            outcome: entity.outcome,
            payload: entity.payload,
            received_at: entity.received_at,
        }
    }
}

/// Verified event to claim before it is processed.
#[derive(Debug, Clone)]
pub struct ClaimPaymentEventParams {
    pub provider_event_id: String,
    pub event_type: String,
    pub resource_id: Option<String>,
    pub payload: String,
}

/// Answer returned to the provider for a webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookAck {
    pub event_id: String,
    pub outcome: WebhookOutcome,
}

impl WebhookAck {
    pub fn into_dto(self) -> WebhookAckDto {
        WebhookAckDto {
            event_id: self.event_id,
            outcome: self.outcome.into_dto(),
        }
    }
}
