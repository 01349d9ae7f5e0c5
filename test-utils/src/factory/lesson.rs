//! Lesson factory for creating test lesson entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test lessons inside a section.
pub struct LessonFactory<'a> {
    db: &'a DatabaseConnection,
    section_id: i32,
    title: String,
    content: String,
    video_url: Option<String>,
    duration_seconds: Option<i32>,
    is_preview: bool,
    position: i32,
}

impl<'a> LessonFactory<'a> {
    /// Defaults: title `"Lesson {id}"`, markdown content, not a preview, position `1`.
    pub fn new(db: &'a DatabaseConnection, section_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            section_id,
            title: format!("Lesson {}", id),
            content: format!("# Lesson {}\n\nSome *content*.", id),
            video_url: None,
            duration_seconds: None,
            is_preview: false,
            position: 1,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    pub fn duration_seconds(mut self, duration_seconds: i32) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    pub fn preview(mut self, is_preview: bool) -> Self {
        self.is_preview = is_preview;
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub async fn build(self) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            section_id: ActiveValue::Set(self.section_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            video_url: ActiveValue::Set(self.video_url),
            duration_seconds: ActiveValue::Set(self.duration_seconds),
            is_preview: ActiveValue::Set(self.is_preview),
            position: ActiveValue::Set(self.position),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a non-preview lesson at position 1 of the given section.
pub async fn create_lesson(
    db: &DatabaseConnection,
    section_id: i32,
) -> Result<entity::lesson::Model, DbErr> {
    LessonFactory::new(db, section_id).build().await
}
