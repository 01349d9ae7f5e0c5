//! PayPal webhook reconciliation.
//!
//! A delivery is verified with PayPal, claimed on its event id, matched to a
//! purchase and mapped onto the purchase status transition table. Every verified
//! event is recorded with the outcome of processing it. A claim whose processing
//! fails is released so the provider's retry is handled again.

use axum::http::HeaderMap;
use entity::purchase::PurchaseStatus;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    data::{payment_event::PaymentEventRepository, purchase::PurchaseRepository},
    error::{payment::PaymentError, AppError},
    model::{
        payment::{ClaimPaymentEventParams, WebhookAck, WebhookOutcome},
        purchase::{Purchase, StatusChange},
    },
    service::{
        paypal::{PayPalClient, WebhookHeaders},
        purchase::{checkout::CheckoutService, PurchaseService},
    },
    util::money,
};

const HEADER_TRANSMISSION_ID: &str = "paypal-transmission-id";
const HEADER_TRANSMISSION_TIME: &str = "paypal-transmission-time";
const HEADER_TRANSMISSION_SIG: &str = "paypal-transmission-sig";
const HEADER_CERT_URL: &str = "paypal-cert-url";
const HEADER_AUTH_ALGO: &str = "paypal-auth-algo";

/// What a handled event type does to the matched purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventAction {
    /// Buyer approved the order, capture it.
    Capture,
    /// Capture completed, amount must match the purchase.
    Complete,
    SetStatus(PurchaseStatus),
}

impl EventAction {
    fn for_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "CHECKOUT.ORDER.APPROVED" => Some(Self::Capture),
            "PAYMENT.CAPTURE.COMPLETED" => Some(Self::Complete),
            "PAYMENT.CAPTURE.DENIED" | "PAYMENT.CAPTURE.DECLINED" => {
                Some(Self::SetStatus(PurchaseStatus::Failed))
            }
            "PAYMENT.CAPTURE.REFUNDED" | "PAYMENT.CAPTURE.REVERSED" => {
                Some(Self::SetStatus(PurchaseStatus::Refunded))
            }
            "CHECKOUT.ORDER.VOIDED" => Some(Self::SetStatus(PurchaseStatus::Cancelled)),
            _ => None,
        }
    }
}

impl WebhookHeaders {
    /// Reads the transmission headers of a webhook delivery.
    ///
    /// # Returns
    /// - `Ok(WebhookHeaders)` - All five headers present
    /// - `Err(PaymentError::MissingWebhookHeader)` - First header that is missing or not UTF-8
    pub fn from_header_map(headers: &HeaderMap) -> Result<Self, PaymentError> {
        let get = |name: &'static str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(PaymentError::MissingWebhookHeader(name))
        };

        Ok(Self {
            transmission_id: get(HEADER_TRANSMISSION_ID)?,
            transmission_time: get(HEADER_TRANSMISSION_TIME)?,
            transmission_sig: get(HEADER_TRANSMISSION_SIG)?,
            cert_url: get(HEADER_CERT_URL)?,
            auth_algo: get(HEADER_AUTH_ALGO)?,
        })
    }
}

pub struct WebhookService<'a> {
    db: &'a DatabaseConnection,
    paypal: &'a PayPalClient,
}

impl<'a> WebhookService<'a> {
    pub fn new(db: &'a DatabaseConnection, paypal: &'a PayPalClient) -> Self {
        Self { db, paypal }
    }

    /// Processes one PayPal webhook delivery.
    ///
    /// # Arguments
    /// - `headers` - Request headers carrying the transmission signature
    /// - `body` - Raw JSON event
    ///
    /// # Returns
    /// - `Ok(WebhookAck)` - Event id and what processing did
    /// - `Err(PaymentError::MissingWebhookHeader)` - A transmission header is missing
    /// - `Err(PaymentError::MalformedEvent)` - Body is not a PayPal event
    /// - `Err(PaymentError::SignatureVerificationFailed)` - PayPal did not verify the delivery
    pub async fn handle(&self, headers: &HeaderMap, body: &[u8]) -> Result<WebhookAck, AppError> {
        let transmission = WebhookHeaders::from_header_map(headers)?;

        let event: Value = serde_json::from_slice(body)
            .map_err(|e| PaymentError::MalformedEvent(e.to_string()))?;

        if !self
            .paypal
            .verify_webhook_signature(&transmission, &event)
            .await?
        {
            return Err(PaymentError::SignatureVerificationFailed(
                transmission.transmission_id,
            )
            .into());
        }

        let event_id = string_at(&event, &["id"])
            .ok_or_else(|| PaymentError::MalformedEvent("missing event id".to_string()))?;
        let event_type = string_at(&event, &["event_type"])
            .ok_or_else(|| PaymentError::MalformedEvent("missing event_type".to_string()))?;
        let resource = event
            .get("resource")
            .filter(|resource| resource.is_object())
            .ok_or_else(|| PaymentError::MalformedEvent("missing resource".to_string()))?;

        let events = PaymentEventRepository::new(self.db);
        let claimed = events
            .claim(ClaimPaymentEventParams {
                provider_event_id: event_id.clone(),
                event_type: event_type.clone(),
                resource_id: string_at(resource, &["id"]),
                payload: event.to_string(),
            })
            .await?;

        if !claimed {
            tracing::debug!(event_id = %event_id, "Skipping replayed webhook event");

            return Ok(WebhookAck {
                event_id,
                outcome: WebhookOutcome::Duplicate,
            });
        }

        let (purchase_id, outcome) = match self.process(&event_type, resource).await {
            Ok(processed) => processed,
            Err(e) => {
                events.release(&event_id).await?;
                return Err(e);
            }
        };

        events.finish(&event_id, purchase_id, outcome).await?;

        tracing::info!(
            event_id = %event_id,
            event_type = %event_type,
            purchase_id = ?purchase_id,
            outcome = outcome.as_str(),
            "Processed PayPal webhook"
        );

        Ok(WebhookAck { event_id, outcome })
    }

    /// Resolves the purchase of a claimed event and applies the event to it.
    async fn process(
        &self,
        event_type: &str,
        resource: &Value,
    ) -> Result<(Option<i32>, WebhookOutcome), AppError> {
        let purchase = self.resolve_purchase(event_type, resource).await?;
        let purchase_id = purchase.as_ref().map(|purchase| purchase.id);

        let outcome = match (EventAction::for_event_type(event_type), purchase) {
            (None, _) => {
                tracing::debug!(event_type = %event_type, "Ignoring unhandled webhook event");
                WebhookOutcome::Ignored
            }
            (Some(_), None) => {
                tracing::warn!(event_type = %event_type, "Webhook event matches no purchase");
                WebhookOutcome::Unmatched
            }
            (Some(action), Some(purchase)) => self.apply(action, purchase, resource).await?,
        };

        Ok((purchase_id, outcome))
    }

    /// Finds the purchase an event resource refers to.
    ///
    /// Tries the `custom_id` carrying the purchase id, then the related order id,
    /// then the resource id as an order id for order events or a capture id otherwise.
    async fn resolve_purchase(
        &self,
        event_type: &str,
        resource: &Value,
    ) -> Result<Option<Purchase>, AppError> {
        let repo = PurchaseRepository::new(self.db);

        if let Some(purchase_id) =
            string_at(resource, &["custom_id"]).and_then(|id| id.parse::<i32>().ok())
        {
            if let Some(purchase) = repo.find_by_id(purchase_id).await? {
                return Ok(Some(purchase));
            }
        }

        if let Some(order_id) =
            string_at(resource, &["supplementary_data", "related_ids", "order_id"])
        {
            if let Some(purchase) = repo.find_by_order_id(&order_id).await? {
                return Ok(Some(purchase));
            }
        }

        let Some(resource_id) = string_at(resource, &["id"]) else {
            return Ok(None);
        };

        if event_type.starts_with("CHECKOUT.ORDER.") {
            Ok(repo.find_by_order_id(&resource_id).await?)
        } else {
            Ok(repo.find_by_capture_id(&resource_id).await?)
        }
    }

    async fn apply(
        &self,
        action: EventAction,
        purchase: Purchase,
        resource: &Value,
    ) -> Result<WebhookOutcome, AppError> {
        let purchases = PurchaseService::new(self.db);

        let (change, _) = match action {
            EventAction::Capture => {
                CheckoutService::new(self.db, self.paypal)
                    .capture_purchase(purchase)
                    .await?
            }
            EventAction::Complete => {
                if !amount_matches(&purchase, resource) {
                    tracing::warn!(
                        purchase_id = purchase.id,
                        expected_cents = purchase.amount_cents,
                        expected_currency = %purchase.currency,
                        "Captured amount does not match purchase"
                    );
                    return Ok(WebhookOutcome::Rejected);
                }

                let capture_id = string_at(resource, &["id"]);
                purchases
                    .apply_status(purchase, PurchaseStatus::Completed, capture_id)
                    .await?
            }
            EventAction::SetStatus(status) => {
                purchases.apply_status(purchase, status, None).await?
            }
        };

        Ok(match change {
            StatusChange::Allowed | StatusChange::Unchanged => WebhookOutcome::Applied,
            StatusChange::Rejected => WebhookOutcome::Rejected,
        })
    }
}

/// Checks the capture `amount` against the purchase amount and currency.
fn amount_matches(purchase: &Purchase, resource: &Value) -> bool {
    let value = string_at(resource, &["amount", "value"]).and_then(|v| money::parse_amount(&v));
    let currency = string_at(resource, &["amount", "currency_code"]);

    value == Some(purchase.amount_cents) && currency.as_deref() == Some(purchase.currency.as_str())
}

/// Reads a string at a nested object path.
fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}
