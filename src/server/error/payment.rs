use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to the payment provider or accepting its webhooks.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The provider answered with a non-success status code.
    #[error("Payment provider returned {status}: {body}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// The request to the provider could not be completed.
    #[error("Payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered 2xx but the body is missing required data.
    #[error("Unexpected payment provider response: {0}")]
    InvalidResponse(String),

    /// A webhook arrived without one of the transmission headers.
    #[error("Missing webhook header {0}")]
    MissingWebhookHeader(&'static str),

    /// The provider did not confirm the webhook signature.
    #[error("Webhook signature verification failed with status {0}")]
    SignatureVerificationFailed(String),

    /// Webhook body is not a valid event.
    #[error("Malformed webhook event: {0}")]
    MalformedEvent(String),
}

/// Converts payment errors into HTTP responses.
///
/// - Webhook rejections (`MissingWebhookHeader`, `SignatureVerificationFailed`,
///   `MalformedEvent`) → 400 Bad Request
/// - Provider failures (`Provider`, `Transport`, `InvalidResponse`) → 502 Bad Gateway
impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingWebhookHeader(_)
            | Self::SignatureVerificationFailed(_)
            | Self::MalformedEvent(_) => {
                tracing::warn!("Rejected webhook: {}", self);
                (StatusCode::BAD_REQUEST, "Invalid webhook request")
            }
            Self::Provider { .. } | Self::Transport(_) | Self::InvalidResponse(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    "Payment provider is unavailable, please try again later",
                )
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
