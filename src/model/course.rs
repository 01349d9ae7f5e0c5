use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{api::LinkDto, curriculum::SectionOutlineDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatusDto {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub instructor_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    /// Price as a decimal string, e.g. `"19.99"`.
    pub price: String,
    pub currency: String,
    pub status: CourseStatusDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub links: Vec<LinkDto>,
}

/// Course with its outline. Lesson content is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailDto {
    #[serde(flatten)]
    pub course: CourseDto,
    pub sections: Vec<SectionOutlineDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCoursesDto {
    pub items: Vec<CourseDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    /// ISO 4217 code, defaults to `USD`.
    pub currency: Option<String>,
    pub category_id: Option<i32>,
}

/// Full replacement of a course's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseDto {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub category_id: Option<i32>,
    pub status: CourseStatusDto,
}
