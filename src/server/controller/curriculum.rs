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
        curriculum::{
            CreateLessonDto, CreateSectionDto, LessonDto, SectionDto, UpdateLessonDto,
            UpdateSectionDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            ability::Ability,
            auth::{AuthGuard, Permission},
        },
        model::curriculum::{
            CreateLessonParams, CreateSectionParams, UpdateLessonParams, UpdateSectionParams,
        },
        service::{course::CourseService, lesson::LessonService, section::SectionService},
        state::AppState,
    },
};

/// Tag for grouping section and lesson endpoints in OpenAPI documentation
pub static CURRICULUM_TAG: &str = "curriculum";

/// Add a section to a course.
///
/// # Access Control
/// - Course instructor or `Admin`
///
/// # Arguments
/// - `course_id` - Course the section belongs to
/// - `payload` - Title and optional position; appended after the last section when omitted
///
/// # Returns
/// - `201 Created` - Created section
/// - `400 Bad Request` - Empty title
/// - `404 Not Found` - Course does not exist
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/sections",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID")
    ),
    request_body = CreateSectionDto,
    responses(
        (status = 201, description = "Successfully created section", body = SectionDto),
        (status = 400, description = "Invalid section data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_section(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<CreateSectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;
    let ability = Ability::for_user(Some(&user));

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let section = SectionService::new(&state.db)
        .create(CreateSectionParams::from_dto(course_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(section.into_dto(&course, &ability))))
}

/// Get a section of a visible course.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section", body = SectionDto),
        (status = 404, description = "Course or section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_section(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, section_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;
    let ability = Ability::for_user(viewer.as_ref());

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let section = SectionService::new(&state.db)
        .get(course_id, section_id)
        .await?;

    Ok((StatusCode::OK, Json(section.into_dto(&course, &ability))))
}

/// Rename or reposition a section.
///
/// # Access Control
/// - Course instructor or `Admin`
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    request_body = UpdateSectionDto,
    responses(
        (status = 200, description = "Successfully updated section", body = SectionDto),
        (status = 400, description = "Invalid section data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_section(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, section_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateSectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;
    let ability = Ability::for_user(Some(&user));

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let section = SectionService::new(&state.db)
        .update(course_id, UpdateSectionParams::from_dto(section_id, payload))
        .await?;

    Ok((StatusCode::OK, Json(section.into_dto(&course, &ability))))
}

/// Delete a section with its lessons.
///
/// # Access Control
/// - Course instructor or `Admin`
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted section"),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_section(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, section_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;

    SectionService::new(&state.db)
        .delete(course_id, section_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a lesson to a section.
///
/// # Access Control
/// - Course instructor or `Admin`
///
/// # Returns
/// - `201 Created` - Created lesson with content
/// - `400 Bad Request` - Empty title or negative duration
/// - `404 Not Found` - Course missing or section filed under another course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/sections/{section_id}/lessons",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("section_id" = i32, Path, description = "Section ID")
    ),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Successfully created lesson", body = LessonDto),
        (status = 400, description = "Invalid lesson data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course or section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, section_id)): Path<(i32, i32)>,
    Json(payload): Json<CreateLessonDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;
    let ability = Ability::for_user(Some(&user));

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let lesson = LessonService::new(&state.db)
        .create(course_id, CreateLessonParams::from_dto(section_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(lesson.into_dto(&course, &ability))))
}

/// Get a lesson with its full content.
///
/// Preview lessons are open to everyone. Other lessons require a completed purchase
/// of the course, or being its instructor or an admin.
///
/// # Returns
/// - `200 OK` - Lesson with content
/// - `401 Unauthorized` - Anonymous viewer of a paid lesson
/// - `403 Forbidden` - Signed-in viewer without a completed purchase
/// - `404 Not Found` - Course not visible or lesson outside the course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/lessons/{lesson_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("lesson_id" = i32, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson with content", body = LessonDto),
        (status = 401, description = "Sign in required", body = ErrorDto),
        (status = 403, description = "Course not purchased", body = ErrorDto),
        (status = 404, description = "Course or lesson not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, lesson_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session)
        .permit(&[Permission::ViewCourseContent(course_id, lesson_id)])
        .await?;
    let ability = Ability::for_user(viewer.as_ref());

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let lesson = LessonService::new(&state.db)
        .get_lesson(course_id, lesson_id)
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto(&course, &ability))))
}

/// Replace a lesson's fields.
///
/// # Access Control
/// - Course instructor or `Admin`
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/lessons/{lesson_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("lesson_id" = i32, Path, description = "Lesson ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Successfully updated lesson", body = LessonDto),
        (status = 400, description = "Invalid lesson data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course or lesson not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, lesson_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateLessonDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;
    let ability = Ability::for_user(Some(&user));

    let course = CourseService::new(&state.db)
        .find_visible(course_id, &ability)
        .await?;
    let lesson = LessonService::new(&state.db)
        .update(course_id, UpdateLessonParams::from_dto(lesson_id, payload))
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto(&course, &ability))))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/lessons/{lesson_id}",
    tag = CURRICULUM_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("lesson_id" = i32, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted lesson"),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not the course instructor", body = ErrorDto),
        (status = 404, description = "Course or lesson not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, lesson_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageCourse(course_id)])
        .await?;

    LessonService::new(&state.db)
        .delete(course_id, lesson_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
