//! Course factory for creating test course entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::course::CourseStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test courses owned by a given instructor.
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    instructor_id: i32,
    category_id: Option<i32>,
    title: String,
    slug: String,
    description: String,
    price_cents: i64,
    currency: String,
    status: CourseStatus,
}

impl<'a> CourseFactory<'a> {
    /// Creates a new CourseFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Course {id}"`, slug: `"course-{id}"`
    /// - price: `1999` USD cents
    /// - status: `Draft`
    /// - no category
    pub fn new(db: &'a DatabaseConnection, instructor_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            instructor_id,
            category_id: None,
            title: format!("Course {}", id),
            slug: format!("course-{}", id),
            description: "A course used in tests".to_string(),
            price_cents: 1999,
            currency: "USD".to_string(),
            status: CourseStatus::Draft,
        }
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn status(mut self, status: CourseStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the course entity into the database.
    pub async fn build(self) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        entity::course::ActiveModel {
            instructor_id: ActiveValue::Set(self.instructor_id),
            category_id: ActiveValue::Set(self.category_id),
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(self.description),
            price_cents: ActiveValue::Set(self.price_cents),
            currency: ActiveValue::Set(self.currency),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft course with default values for the given instructor.
pub async fn create_course(
    db: &DatabaseConnection,
    instructor_id: i32,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, instructor_id).build().await
}
