//! Section factory for creating test section entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test sections inside a course.
pub struct SectionFactory<'a> {
    db: &'a DatabaseConnection,
    course_id: i32,
    title: String,
    position: i32,
}

impl<'a> SectionFactory<'a> {
    /// Defaults: title `"Section {id}"`, position `1`.
    pub fn new(db: &'a DatabaseConnection, course_id: i32) -> Self {
        Self {
            db,
            course_id,
            title: format!("Section {}", next_id()),
            position: 1,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub async fn build(self) -> Result<entity::section::Model, DbErr> {
        entity::section::ActiveModel {
            course_id: ActiveValue::Set(self.course_id),
            title: ActiveValue::Set(self.title),
            position: ActiveValue::Set(self.position),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a section at position 1 of the given course.
pub async fn create_section(
    db: &DatabaseConnection,
    course_id: i32,
) -> Result<entity::section::Model, DbErr> {
    SectionFactory::new(db, course_id).build().await
}
