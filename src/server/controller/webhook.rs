use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, webhook::WebhookAckDto},
    server::{error::AppError, service::webhook::WebhookService, state::AppState},
};

/// Tag for grouping webhook endpoints in OpenAPI documentation
pub static WEBHOOK_TAG: &str = "webhook";

/// Receive a PayPal webhook event.
///
/// Nothing is recorded or applied before PayPal verifies the delivery. Verified events
/// are recorded once; replays answer `duplicate` without side effects.
///
/// # Arguments
/// - `headers` - `paypal-transmission-*`, `paypal-cert-url` and `paypal-auth-algo`
/// - `body` - Raw event JSON, forwarded unchanged to signature verification
///
/// # Returns
/// - `200 OK` - Event id and processing outcome
/// - `400 Bad Request` - Missing headers, failed verification or malformed event
/// - `502 Bad Gateway` - PayPal unreachable; the delivery will be retried
#[utoipa::path(
    post,
    path = "/api/webhooks/paypal",
    tag = WEBHOOK_TAG,
    request_body(content = String, description = "PayPal event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event processed", body = WebhookAckDto),
        (status = 400, description = "Event rejected", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 502, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn paypal_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let ack = WebhookService::new(&state.db, &state.paypal)
        .handle(&headers, &body)
        .await?;

    Ok((StatusCode::OK, Json(ack.into_dto())))
}
