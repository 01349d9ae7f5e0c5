use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::curriculum::{CreateLessonParams, Lesson, UpdateLessonParams};

pub struct LessonRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LessonRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a lesson, appending it to the section when no position is given.
    ///
    /// # Arguments
    /// - `params` - Section id and lesson fields
    ///
    /// # Returns
    /// - `Ok(Lesson)` - The created lesson
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateLessonParams) -> Result<Lesson, DbErr> {
        let position = match params.position {
            Some(position) => position,
            None => {
                let last = entity::prelude::Lesson::find()
                    .filter(entity::lesson::Column::SectionId.eq(params.section_id))
                    .order_by_desc(entity::lesson::Column::Position)
                    .one(self.db)
                    .await?;

                last.map(|lesson| lesson.position + 1).unwrap_or(1)
            }
        };

        let entity = entity::lesson::ActiveModel {
            section_id: ActiveValue::Set(params.section_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            video_url: ActiveValue::Set(params.video_url),
            duration_seconds: ActiveValue::Set(params.duration_seconds),
            is_preview: ActiveValue::Set(params.is_preview),
            position: ActiveValue::Set(position),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Lesson::from_entity(entity))
    }

    /// Finds a lesson only if its section belongs to `course_id`.
    ///
    /// # Returns
    /// - `Ok(Some(Lesson))` - Lesson inside the course
    /// - `Ok(None)` - Lesson missing or filed under another course
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_in_course(
        &self,
        course_id: i32,
        lesson_id: i32,
    ) -> Result<Option<Lesson>, DbErr> {
        let result = entity::prelude::Lesson::find_by_id(lesson_id)
            .find_also_related(entity::prelude::Section)
            .one(self.db)
            .await?;

        Ok(match result {
            Some((lesson, Some(section))) if section.course_id == course_id => {
                Some(Lesson::from_entity(lesson))
            }
            _ => None,
        })
    }

    /// Gets the lessons of the given sections ordered by position.
    pub async fn get_by_sections(&self, section_ids: Vec<i32>) -> Result<Vec<Lesson>, DbErr> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::SectionId.is_in(section_ids))
            .order_by_asc(entity::lesson::Column::Position)
            .order_by_asc(entity::lesson::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Lesson::from_entity).collect())
    }

    /// Replaces the editable fields of a lesson.
    ///
    /// # Returns
    /// - `Ok(Some(Lesson))` - Updated lesson
    /// - `Ok(None)` - Lesson not found
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateLessonParams) -> Result<Option<Lesson>, DbErr> {
        let Some(entity) = entity::prelude::Lesson::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::lesson::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.content = ActiveValue::Set(params.content);
        active.video_url = ActiveValue::Set(params.video_url);
        active.duration_seconds = ActiveValue::Set(params.duration_seconds);
        active.is_preview = ActiveValue::Set(params.is_preview);
        active.position = ActiveValue::Set(params.position);

        let entity = active.update(self.db).await?;

        Ok(Some(Lesson::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Lesson::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
