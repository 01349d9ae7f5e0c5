use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{default_entries, ErrorDto, MAX_ENTRIES_PER_PAGE},
        course::{
            CourseDetailDto, CourseDto, CreateCourseDto, PaginatedCoursesDto, UpdateCourseDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            ability::Ability,
            auth::{AuthGuard, Permission},
        },
        model::course::{CourseFilter, CreateCourseParams, UpdateCourseParams},
        service::course::CourseService,
        state::AppState,
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

/// Catalogue query: pagination plus optional category and title search.
#[derive(Deserialize)]
pub struct CourseListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub category_id: Option<i32>,
    pub search: Option<String>,
}

impl CourseListParams {
    fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES_PER_PAGE)
    }
}

/// Get a page of the published course catalogue.
///
/// Filtering by category includes every subcategory. The search matches the title
/// case-insensitively.
///
/// # Returns
/// - `200 OK` - Page of published courses ordered by title
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-indexed page number"),
        ("entries" = Option<u64>, Query, description = "Courses per page, at most 100"),
        ("category_id" = Option<i32>, Query, description = "Category including its subcategories"),
        ("search" = Option<String>, Query, description = "Title substring")
    ),
    responses(
        (status = 200, description = "Page of published courses", body = PaginatedCoursesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_courses(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CourseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;
    let ability = Ability::for_user(viewer.as_ref());

    let per_page = params.per_page();
    let filter = CourseFilter {
        category_id: params.category_id,
        search: params.search,
    };

    let courses = CourseService::new(&state.db)
        .list_published(params.page, per_page, filter)
        .await?;

    Ok((StatusCode::OK, Json(courses.into_dto(&ability))))
}

/// Create a draft course owned by the signed-in instructor.
///
/// # Access Control
/// - `Instructor` or `Admin` - Students cannot create courses
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Title, description, price, currency and category
///
/// # Returns
/// - `201 Created` - Created draft course with a unique slug
/// - `400 Bad Request` - Invalid title, price or currency
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Signed-in student
/// - `404 Not Found` - Category does not exist
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Successfully created course", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not allowed to create courses", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_course(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateCourse])
        .await?;

    let course = CourseService::new(&state.db)
        .create(CreateCourseParams::from_dto(instructor.id, payload))
        .await?;

    let ability = Ability::for_user(Some(&instructor));

    Ok((StatusCode::CREATED, Json(course.into_dto(&ability))))
}

/// Get a course with its outline.
///
/// Drafts and archived courses are only visible to their instructor and admins;
/// everyone else gets 404. Lesson content is never included.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course with sections and lessons", body = CourseDetailDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;
    let ability = Ability::for_user(viewer.as_ref());

    let course = CourseService::new(&state.db)
        .get(course_id, &ability)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto(&ability))))
}

/// Replace a course's editable fields and status.
///
/// # Access Control
/// - Course instructor or `Admin`
///
/// # Returns
/// - `200 OK` - Updated course
/// - `400 Bad Request` - Invalid fields or publishing a course without lessons
/// - `401 Unauthorized` - Not signed in
/// - `403 Forbidden` - Not the course instructor
/// - `404 Not Found` - Course or category does not exist
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Successfully updated course", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;

    let course = CourseService::new(&state.db)
        .update(UpdateCourseParams::from_dto(course_id, payload))
        .await?;

    let ability = Ability::for_user(Some(&user));

    Ok((StatusCode::OK, Json(course.into_dto(&ability))))
}

/// Delete a course with its curriculum.
///
/// Courses with completed or refunded purchases cannot be deleted; archive them instead.
///
/// # Access Control
/// - Course instructor or `Admin`
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted course"),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Course has settled purchases", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;

    CourseService::new(&state.db).delete(course_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get every course of the signed-in instructor in any status.
///
/// # Access Control
/// - `Instructor` or `Admin`
#[utoipa::path(
    get,
    path = "/api/instructor/courses",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Instructor's courses, newest first", body = Vec<CourseDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_instructor_courses(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CreateCourse])
        .await?;

    let courses = CourseService::new(&state.db)
        .list_by_instructor(instructor.id)
        .await?;

    let ability = Ability::for_user(Some(&instructor));
    let dto: Vec<CourseDto> = courses
        .into_iter()
        .map(|course| course.into_dto(&ability))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}
