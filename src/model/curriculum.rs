use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::LinkDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectionDto {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub position: i32,
    pub links: Vec<LinkDto>,
}

/// Section as shown in a course outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectionOutlineDto {
    pub id: i32,
    pub title: String,
    pub position: i32,
    pub lessons: Vec<LessonSummaryDto>,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LessonSummaryDto {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: i32,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LessonDto {
    pub id: i32,
    pub course_id: i32,
    pub section_id: i32,
    pub title: String,
    /// Markdown source.
    pub content: String,
    /// `content` rendered to HTML.
    pub content_html: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: i32,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSectionDto {
    pub title: String,
    /// Appended after the last section when omitted.
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSectionDto {
    pub title: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLessonDto {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    #[serde(default)]
    pub is_preview: bool,
    /// Appended after the last lesson of the section when omitted.
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLessonDto {
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: i32,
}
