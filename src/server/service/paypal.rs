//! PayPal REST client.
//!
//! Wraps the three calls the marketplace needs: creating a checkout order, capturing
//! it and verifying webhook signatures. Every call authenticates with a
//! client-credentials access token that is cached until shortly before it expires.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::server::{error::payment::PaymentError, util::money};

/// Tokens are refreshed this long before PayPal expires them.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct ProviderLink {
    href: String,
    rel: String,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    #[serde(default)]
    links: Vec<ProviderLink>,
}

#[derive(Deserialize)]
struct CaptureResponse {
    status: String,
    #[serde(default)]
    purchase_units: Vec<CapturedUnit>,
}

#[derive(Deserialize)]
struct CapturedUnit {
    payments: Option<CapturedPayments>,
}

#[derive(Deserialize)]
struct CapturedPayments {
    #[serde(default)]
    captures: Vec<CaptureDetail>,
}

#[derive(Deserialize)]
struct CaptureDetail {
    id: String,
    status: String,
}

#[derive(Deserialize)]
struct VerificationResponse {
    verification_status: String,
}

/// Order created at PayPal for a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub order_id: String,
    /// Page the buyer visits to approve the payment.
    pub approval_url: Option<String>,
}

/// Outcome of capturing an approved order.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    /// Capture status, or the order status when no capture was returned.
    pub status: String,
    pub capture_id: Option<String>,
}

impl CaptureResult {
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

/// Checkout order request for a single purchase.
#[derive(Debug, Clone)]
pub struct OrderRequest<'a> {
    pub purchase_id: i32,
    pub description: &'a str,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub return_url: String,
    pub cancel_url: String,
}

/// Transmission headers PayPal sends with every webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookHeaders {
    pub transmission_id: String,
    pub transmission_time: String,
    pub transmission_sig: String,
    pub cert_url: String,
    pub auth_algo: String,
}

#[derive(Clone)]
pub struct PayPalClient {
    http: reqwest::Client,
    api_base: String,
    client_id: String,
    client_secret: String,
    webhook_id: String,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl PayPalClient {
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `api_base` - API root such as `https://api-m.sandbox.paypal.com`
    /// - `client_id` / `client_secret` - REST app credentials
    /// - `webhook_id` - Id of the webhook registration used for signature checks
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        webhook_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            webhook_id: webhook_id.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a CAPTURE intent order carrying the purchase id as `custom_id`.
    ///
    /// # Returns
    /// - `Ok(CreatedOrder)` - Order id and the buyer approval link
    /// - `Err(PaymentError::Provider)` - PayPal rejected the order
    /// - `Err(PaymentError::Transport)` - PayPal could not be reached
    pub async fn create_order(&self, order: OrderRequest<'_>) -> Result<CreatedOrder, PaymentError> {
        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": order.purchase_id.to_string(),
                "custom_id": order.purchase_id.to_string(),
                "description": order.description,
                "amount": {
                    "currency_code": order.currency,
                    "value": money::format_amount(order.amount_cents),
                },
            }],
            "application_context": {
                "return_url": order.return_url,
                "cancel_url": order.cancel_url,
                "user_action": "PAY_NOW",
            },
        });

        let response: OrderResponse = self
            .send(
                self.http
                    .post(self.url("/v2/checkout/orders"))
                    .json(&body),
            )
            .await?;

        let approval_url = response
            .links
            .into_iter()
            .find(|link| link.rel == "approve" || link.rel == "payer-action")
            .map(|link| link.href);

        tracing::info!(
            purchase_id = order.purchase_id,
            order_id = %response.id,
            "Created PayPal order"
        );

        Ok(CreatedOrder {
            order_id: response.id,
            approval_url,
        })
    }

    /// Captures the payment of an approved order.
    pub async fn capture_order(&self, order_id: &str) -> Result<CaptureResult, PaymentError> {
        let response: CaptureResponse = self
            .send(
                self.http
                    .post(self.url(&format!("/v2/checkout/orders/{}/capture", order_id)))
                    .json(&json!({})),
            )
            .await?;

        let capture = response
            .purchase_units
            .into_iter()
            .filter_map(|unit| unit.payments)
            .flat_map(|payments| payments.captures)
            .next();

        let result = match capture {
            Some(capture) => CaptureResult {
                status: capture.status,
                capture_id: Some(capture.id),
            },
            None => CaptureResult {
                status: response.status,
                capture_id: None,
            },
        };

        tracing::info!(order_id, status = %result.status, "Captured PayPal order");

        Ok(result)
    }

    /// Asks PayPal whether a webhook delivery is authentic.
    ///
    /// # Arguments
    /// - `headers` - Transmission headers of the delivery
    /// - `event` - Parsed webhook body, sent back unchanged
    ///
    /// # Returns
    /// - `Ok(true)` - PayPal answered `SUCCESS`
    /// - `Ok(false)` - Any other verification status
    /// - `Err(PaymentError)` - The verification call itself failed
    pub async fn verify_webhook_signature(
        &self,
        headers: &WebhookHeaders,
        event: &Value,
    ) -> Result<bool, PaymentError> {
        let body = json!({
            "auth_algo": headers.auth_algo,
            "cert_url": headers.cert_url,
            "transmission_id": headers.transmission_id,
            "transmission_sig": headers.transmission_sig,
            "transmission_time": headers.transmission_time,
            "webhook_id": self.webhook_id,
            "webhook_event": event,
        });

        let response: VerificationResponse = self
            .send(
                self.http
                    .post(self.url("/v1/notifications/verify-webhook-signature"))
                    .json(&body),
            )
            .await?;

        if response.verification_status != "SUCCESS" {
            tracing::warn!(
                transmission_id = %headers.transmission_id,
                status = %response.verification_status,
                "PayPal did not verify webhook signature"
            );
        }

        Ok(response.verification_status == "SUCCESS")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Sends an authenticated request and decodes a 2xx JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PaymentError> {
        let token = self.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        decode(response).await
    }

    /// Returns the cached access token, fetching a new one when it is about to expire.
    async fn access_token(&self) -> Result<String, PaymentError> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.access_token.clone());
            }
        }

        let response = self
            .http
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: TokenResponse = decode(response).await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *guard = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        tracing::debug!(expires_in = token.expires_in, "Fetched PayPal access token");

        Ok(token.access_token)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PaymentError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PaymentError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| PaymentError::InvalidResponse(e.to_string()))
}
