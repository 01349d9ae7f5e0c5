use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginationParams},
        purchase::{PaginatedPurchasesDto, PurchaseListParams},
        user::{PaginatedUsersDto, SetRoleDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{
            ability::Ability,
            auth::{AuthGuard, Permission},
        },
        service::{purchase::PurchaseService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Get paginated users ordered by name.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-indexed page number"),
        ("entries" = Option<u64>, Query, description = "Users per page, at most 100")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .get_all_users(params.page, params.per_page())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Change the role of a user.
///
/// # Access Control
/// - `Admin` - Only admins can change roles; admins cannot demote themselves
///
/// # Returns
/// - `200 OK` - User with the new role
/// - `400 Bad Request` - Admin tried to demote themself
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = SetRoleDto,
    responses(
        (status = 200, description = "Role changed", body = UserDto),
        (status = 400, description = "Admins cannot demote themselves", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_role(&admin, user_id, payload.role.into())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Get paginated purchases, newest first.
///
/// # Access Control
/// - `Admin` - Only admins can list all purchases
#[utoipa::path(
    get,
    path = "/api/admin/purchases",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-indexed page number"),
        ("entries" = Option<u64>, Query, description = "Purchases per page, at most 100"),
        ("status" = Option<String>, Query, description = "Only purchases in this status")
    ),
    responses(
        (status = 200, description = "Page of purchases", body = PaginatedPurchasesDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_purchases(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PurchaseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let purchases = PurchaseService::new(&state.db)
        .list_all(params.page, params.per_page(), params.status.map(Into::into))
        .await?;

    let ability = Ability::for_user(Some(&admin));

    Ok((StatusCode::OK, Json(purchases.into_dto(&ability))))
}
