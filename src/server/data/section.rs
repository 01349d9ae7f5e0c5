use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::curriculum::{CreateSectionParams, Section, UpdateSectionParams};

pub struct SectionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SectionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a section, appending it after the last one when no position is given.
    ///
    /// # Arguments
    /// - `params` - Course id, title and optional position
    ///
    /// # Returns
    /// - `Ok(Section)` - The created section
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateSectionParams) -> Result<Section, DbErr> {
        let position = match params.position {
            Some(position) => position,
            None => self.next_position(params.course_id).await?,
        };

        let entity = entity::section::ActiveModel {
            course_id: ActiveValue::Set(params.course_id),
            title: ActiveValue::Set(params.title),
            position: ActiveValue::Set(position),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Section::from_entity(entity))
    }

    /// Finds a section only if it belongs to `course_id`.
    pub async fn find_in_course(
        &self,
        course_id: i32,
        section_id: i32,
    ) -> Result<Option<Section>, DbErr> {
        let entity = entity::prelude::Section::find_by_id(section_id)
            .filter(entity::section::Column::CourseId.eq(course_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Section::from_entity))
    }

    /// Gets the sections of a course ordered by position.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Section>, DbErr> {
        let entities = entity::prelude::Section::find()
            .filter(entity::section::Column::CourseId.eq(course_id))
            .order_by_asc(entity::section::Column::Position)
            .order_by_asc(entity::section::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Section::from_entity).collect())
    }

    /// Replaces the title and position of a section.
    ///
    /// # Returns
    /// - `Ok(Some(Section))` - Updated section
    /// - `Ok(None)` - Section not found
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateSectionParams) -> Result<Option<Section>, DbErr> {
        let Some(entity) = entity::prelude::Section::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::section::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.position = ActiveValue::Set(params.position);

        let entity = active.update(self.db).await?;

        Ok(Some(Section::from_entity(entity)))
    }

    /// Deletes a section together with its lessons.
    ///
    /// # Returns
    /// - `Ok(true)` - Section deleted
    /// - `Ok(false)` - Section not found
    /// - `Err(DbErr)` - Database error; nothing is written
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::Lesson::delete_many()
            .filter(entity::lesson::Column::SectionId.eq(id))
            .exec(&txn)
            .await?;

        let result = entity::prelude::Section::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn next_position(&self, course_id: i32) -> Result<i32, DbErr> {
        let last = entity::prelude::Section::find()
            .filter(entity::section::Column::CourseId.eq(course_id))
            .order_by_desc(entity::section::Column::Position)
            .one(self.db)
            .await?;

        Ok(last.map(|section| section.position + 1).unwrap_or(1))
    }
}
