use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What happened to a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WebhookOutcomeDto {
    Applied,
    Duplicate,
    Ignored,
    Rejected,
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WebhookAckDto {
    pub event_id: String,
    pub outcome: WebhookOutcomeDto,
}
