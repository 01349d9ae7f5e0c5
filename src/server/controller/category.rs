use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        category::{CategoryDto, CategoryTreeNodeDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        error::AppError,
        middleware::{
            ability::Ability,
            auth::{AuthGuard, Permission},
        },
        model::category::{CreateCategoryParams, UpdateCategoryParams},
        service::category::CategoryService,
        state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// Get the full category tree.
///
/// Roots and children are ordered by name.
///
/// # Returns
/// - `200 OK` - Category forest
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Category tree", body = Vec<CategoryTreeNodeDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category_tree(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tree = CategoryService::new(&state.db).tree().await?;

    let dto: Vec<CategoryTreeNodeDto> = tree.into_iter().map(|node| node.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Create a category.
///
/// The slug is derived from the name when omitted.
///
/// # Access Control
/// - `Admin` - Only admins can create categories
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Name, optional slug, description and parent
///
/// # Returns
/// - `201 Created` - Created category with its breadcrumb
/// - `400 Bad Request` - Empty name or slug
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Not an admin
/// - `404 Not Found` - Parent category does not exist
/// - `409 Conflict` - Slug already taken
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Successfully created category", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Parent category not found", body = ErrorDto),
        (status = 409, description = "Slug already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let category = CategoryService::new(&state.db)
        .create(CreateCategoryParams::from_dto(payload))
        .await?;

    let ability = Ability::for_user(Some(&admin));

    Ok((StatusCode::CREATED, Json(category.into_dto(&ability))))
}

/// Get a category with its breadcrumb and direct children.
#[utoipa::path(
    get,
    path = "/api/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;
    let ability = Ability::for_user(viewer.as_ref());

    let category = CategoryService::new(&state.db).get(category_id).await?;

    Ok((StatusCode::OK, Json(category.into_dto(&ability))))
}

/// Replace a category's name, description and parent.
///
/// A `null` parent moves the category to the root. A category cannot be moved
/// below itself or one of its descendants.
///
/// # Access Control
/// - `Admin` - Only admins can update categories
///
/// # Returns
/// - `200 OK` - Updated category
/// - `400 Bad Request` - Empty name or move into own subtree
/// - `404 Not Found` - Category or new parent does not exist
#[utoipa::path(
    put,
    path = "/api/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Successfully updated category", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
    Json(payload): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let category = CategoryService::new(&state.db)
        .update(UpdateCategoryParams::from_dto(category_id, payload))
        .await?;

    let ability = Ability::for_user(Some(&admin));

    Ok((StatusCode::OK, Json(category.into_dto(&ability))))
}

/// Delete a category.
///
/// Child categories are deleted with it; courses filed under them become
/// uncategorized.
///
/// # Access Control
/// - `Admin` - Only admins can delete categories
#[utoipa::path(
    delete,
    path = "/api/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted category"),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    CategoryService::new(&state.db).delete(category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
