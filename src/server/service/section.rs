use sea_orm::DatabaseConnection;

use crate::server::{
    data::section::SectionRepository,
    error::AppError,
    model::curriculum::{CreateSectionParams, Section, UpdateSectionParams},
};

pub struct SectionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SectionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a section to a course unless a position is given.
    pub async fn create(&self, params: CreateSectionParams) -> Result<Section, AppError> {
        require_title(&params.title)?;

        let section = SectionRepository::new(self.db).create(params).await?;

        tracing::info!(
            course_id = section.course_id,
            section_id = section.id,
            "Created section"
        );

        Ok(section)
    }

    /// Gets a section of a course.
    ///
    /// # Returns
    /// - `Ok(Section)` - Section inside the course
    /// - `Err(AppError::NotFound)` - Section missing or filed under another course
    pub async fn get(&self, course_id: i32, section_id: i32) -> Result<Section, AppError> {
        SectionRepository::new(self.db)
            .find_in_course(course_id, section_id)
            .await?
            .ok_or_else(|| not_found(section_id))
    }

    pub async fn update(
        &self,
        course_id: i32,
        params: UpdateSectionParams,
    ) -> Result<Section, AppError> {
        require_title(&params.title)?;

        let id = params.id;
        self.get(course_id, id).await?;

        SectionRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a section of a course with its lessons.
    pub async fn delete(&self, course_id: i32, section_id: i32) -> Result<(), AppError> {
        self.get(course_id, section_id).await?;

        if !SectionRepository::new(self.db).delete(section_id).await? {
            return Err(not_found(section_id));
        }

        tracing::info!(course_id, section_id, "Deleted section");

        Ok(())
    }
}

pub(super) fn require_title(title: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Section {} not found", id))
}
