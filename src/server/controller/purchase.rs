use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, purchase::PurchaseDto},
    server::{
        error::AppError,
        middleware::{
            ability::Ability,
            auth::{AuthGuard, Permission},
        },
        service::purchase::{checkout::CheckoutService, PurchaseService},
        state::AppState,
    },
};

/// Tag for grouping purchase endpoints in OpenAPI documentation
pub static PURCHASE_TAG: &str = "purchase";

/// Start buying a course.
///
/// Free courses complete immediately. For priced courses a PayPal order is created
/// and the response carries an `approve` link to send the buyer to. Repeating the
/// request while a purchase is pending returns that purchase.
///
/// # Access Control
/// - Any signed-in user except the course instructor
///
/// # Arguments
/// - `state` - Application state containing the database and PayPal client
/// - `session` - User's session for authentication
/// - `course_id` - Published course to buy
///
/// # Returns
/// - `201 Created` - Pending purchase with approval link, or completed free purchase
/// - `400 Bad Request` - Buyer is the course instructor
/// - `401 Unauthorized` - Not signed in
/// - `404 Not Found` - Course missing or not published
/// - `409 Conflict` - Course already owned
/// - `502 Bad Gateway` - PayPal rejected the order
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/purchase",
    tag = PURCHASE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 201, description = "Purchase started", body = PurchaseDto),
        (status = 400, description = "Instructors cannot buy their own course", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Course already owned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 502, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn start_purchase(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let buyer = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let purchase = CheckoutService::new(&state.db, &state.paypal)
        .start(&buyer, course_id, &state.app_url)
        .await?;

    let ability = Ability::for_user(Some(&buyer));

    Ok((StatusCode::CREATED, Json(purchase.into_dto(&ability))))
}

/// Get a purchase.
///
/// # Access Control
/// - Buyer or `Admin`
#[utoipa::path(
    get,
    path = "/api/purchases/{purchase_id}",
    tag = PURCHASE_TAG,
    params(
        ("purchase_id" = i32, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Purchase", body = PurchaseDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the buyer", body = ErrorDto),
        (status = 404, description = "Purchase not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_purchase(
    State(state): State<AppState>,
    session: Session,
    Path(purchase_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewPurchase(purchase_id)])
        .await?;

    let purchase = PurchaseService::new(&state.db).get(purchase_id).await?;

    let ability = Ability::for_user(Some(&user));

    Ok((StatusCode::OK, Json(purchase.into_dto(&ability))))
}

/// Capture the PayPal order of a pending purchase after the buyer approved it.
///
/// Capturing a completed purchase returns it unchanged without calling PayPal.
///
/// # Access Control
/// - Buyer only
///
/// # Returns
/// - `200 OK` - Purchase after capture; may still be pending
/// - `400 Bad Request` - Purchase has no PayPal order
/// - `403 Forbidden` - Not the buyer
/// - `404 Not Found` - Purchase does not exist
/// - `409 Conflict` - Purchase failed, was cancelled or refunded
/// - `502 Bad Gateway` - PayPal rejected the capture
#[utoipa::path(
    post,
    path = "/api/purchases/{purchase_id}/capture",
    tag = PURCHASE_TAG,
    params(
        ("purchase_id" = i32, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Purchase after capture", body = PurchaseDto),
        (status = 400, description = "Purchase has no order", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the buyer", body = ErrorDto),
        (status = 404, description = "Purchase not found", body = ErrorDto),
        (status = 409, description = "Purchase can no longer be captured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 502, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn capture_purchase(
    State(state): State<AppState>,
    session: Session,
    Path(purchase_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let buyer = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewPurchase(purchase_id)])
        .await?;

    let purchase = CheckoutService::new(&state.db, &state.paypal)
        .capture(&buyer, purchase_id)
        .await?;

    let ability = Ability::for_user(Some(&buyer));

    Ok((StatusCode::OK, Json(purchase.into_dto(&ability))))
}

/// Get every purchase of the signed-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/user/purchases",
    tag = PURCHASE_TAG,
    responses(
        (status = 200, description = "User's purchases", body = Vec<PurchaseDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_purchases(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let purchases = PurchaseService::new(&state.db)
        .list_for_user(user.id)
        .await?;

    let ability = Ability::for_user(Some(&user));
    let dto: Vec<PurchaseDto> = purchases
        .into_iter()
        .map(|purchase| purchase.into_dto(&ability))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}
