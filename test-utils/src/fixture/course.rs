//! Course fixtures for creating in-memory test data.

use chrono::Utc;
use entity::course::{self, CourseStatus};

/// Default test course title.
pub const DEFAULT_TITLE: &str = "Intro to Testing";

/// Default test course slug.
pub const DEFAULT_SLUG: &str = "intro-to-testing";

/// Default instructor id for fixture courses.
pub const DEFAULT_INSTRUCTOR_ID: i32 = 2;

/// Default price in minor units.
pub const DEFAULT_PRICE_CENTS: i64 = 1999;

/// Creates a draft course entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - instructor_id: `2`
/// - title: `"Intro to Testing"`
/// - price: `1999` USD cents
/// - status: `Draft`
pub fn entity() -> course::Model {
    entity_builder().build()
}

/// Creates a course entity builder for customization.
pub fn entity_builder() -> CourseEntityBuilder {
    CourseEntityBuilder::default()
}

/// Builder for creating customized course entity models.
pub struct CourseEntityBuilder {
    id: i32,
    instructor_id: i32,
    category_id: Option<i32>,
    title: String,
    slug: String,
    price_cents: i64,
    currency: String,
    status: CourseStatus,
}

impl Default for CourseEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            instructor_id: DEFAULT_INSTRUCTOR_ID,
            category_id: None,
            title: DEFAULT_TITLE.to_string(),
            slug: DEFAULT_SLUG.to_string(),
            price_cents: DEFAULT_PRICE_CENTS,
            currency: "USD".to_string(),
            status: CourseStatus::Draft,
        }
    }
}

impl CourseEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn instructor_id(mut self, instructor_id: i32) -> Self {
        self.instructor_id = instructor_id;
        self
    }

    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
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

    /// Builds and returns the course entity model.
    pub fn build(self) -> course::Model {
        let now = Utc::now();
        course::Model {
            id: self.id,
            instructor_id: self.instructor_id,
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            description: String::new(),
            price_cents: self.price_cents,
            currency: self.currency,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}
