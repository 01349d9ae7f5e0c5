use sea_orm::DatabaseConnection;

use crate::server::{
    data::lesson::LessonRepository,
    error::AppError,
    model::curriculum::{CreateLessonParams, Lesson, UpdateLessonParams},
    service::section::{require_title, SectionService},
};

pub struct LessonService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LessonService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a lesson to a section of `course_id`.
    ///
    /// # Returns
    /// - `Ok(Lesson)` - Created lesson
    /// - `Err(AppError::BadRequest)` - Empty title or negative duration
    /// - `Err(AppError::NotFound)` - Section missing or filed under another course
    pub async fn create(
        &self,
        course_id: i32,
        params: CreateLessonParams,
    ) -> Result<Lesson, AppError> {
        require_title(&params.title)?;
        require_duration(params.duration_seconds)?;

        SectionService::new(self.db)
            .get(course_id, params.section_id)
            .await?;

        let lesson = LessonRepository::new(self.db).create(params).await?;

        tracing::info!(
            course_id,
            section_id = lesson.section_id,
            lesson_id = lesson.id,
            "Created lesson"
        );

        Ok(lesson)
    }

    /// Gets a lesson with its full content.
    ///
    /// Access to the content is checked by the caller.
    pub async fn get_lesson(&self, course_id: i32, lesson_id: i32) -> Result<Lesson, AppError> {
        LessonRepository::new(self.db)
            .find_in_course(course_id, lesson_id)
            .await?
            .ok_or_else(|| not_found(lesson_id))
    }

    pub async fn update(
        &self,
        course_id: i32,
        params: UpdateLessonParams,
    ) -> Result<Lesson, AppError> {
        require_title(&params.title)?;
        require_duration(params.duration_seconds)?;

        let id = params.id;
        self.get_lesson(course_id, id).await?;

        LessonRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, course_id: i32, lesson_id: i32) -> Result<(), AppError> {
        self.get_lesson(course_id, lesson_id).await?;

        if !LessonRepository::new(self.db).delete(lesson_id).await? {
            return Err(not_found(lesson_id));
        }

        tracing::info!(course_id, lesson_id, "Deleted lesson");

        Ok(())
    }
}

fn require_duration(duration_seconds: Option<i32>) -> Result<(), AppError> {
    match duration_seconds {
        Some(seconds) if seconds < 0 => Err(AppError::BadRequest(
            "Lesson duration must not be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Lesson {} not found", id))
}
