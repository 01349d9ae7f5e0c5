//! Section and lesson domain models and parameters.

use crate::{
    model::curriculum::{
        CreateLessonDto, CreateSectionDto, LessonDto, LessonSummaryDto, SectionDto,
        SectionOutlineDto, UpdateLessonDto, UpdateSectionDto,
    },
    server::{
        middleware::ability::Ability,
        model::course::Course,
        util::{links, markdown},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub position: i32,
}

impl Section {
    pub fn from_entity(entity: entity::section::Model) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            title: entity.title,
            position: entity.position,
        }
    }

    pub fn into_dto(self, course: &Course, ability: &Ability) -> SectionDto {
        SectionDto {
            links: links::section_links(course, self.id, ability),
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: i32,
}

impl Lesson {
    pub fn from_entity(entity: entity::lesson::Model) -> Self {
        Self {
            id: entity.id,
            section_id: entity.section_id,
            title: entity.title,
            content: entity.content,
            video_url: entity.video_url,
            duration_seconds: entity.duration_seconds,
            is_preview: entity.is_preview,
            position: entity.position,
        }
    }

    /// Outline entry without content.
    pub fn into_summary_dto(self, course: &Course, ability: &Ability) -> LessonSummaryDto {
        LessonSummaryDto {
            links: links::lesson_links(course, self.id, ability),
            id: self.id,
            section_id: self.section_id,
            title: self.title,
            duration_seconds: self.duration_seconds,
            is_preview: self.is_preview,
            position: self.position,
        }
    }

    /// Full lesson with rendered content.
    pub fn into_dto(self, course: &Course, ability: &Ability) -> LessonDto {
        LessonDto {
            links: links::lesson_links(course, self.id, ability),
            content_html: markdown::render(&self.content),
            id: self.id,
            course_id: course.id,
            section_id: self.section_id,
            title: self.title,
            content: self.content,
            video_url: self.video_url,
            duration_seconds: self.duration_seconds,
            is_preview: self.is_preview,
            position: self.position,
        }
    }
}

/// Section with its lessons, as shown in a course outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutline {
    pub section: Section,
    pub lessons: Vec<Lesson>,
}

impl SectionOutline {
    pub fn into_dto(self, course: &Course, ability: &Ability) -> SectionOutlineDto {
        SectionOutlineDto {
            links: links::section_links(course, self.section.id, ability),
            id: self.section.id,
            title: self.section.title,
            position: self.section.position,
            lessons: self
                .lessons
                .into_iter()
                .map(|lesson| lesson.into_summary_dto(course, ability))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSectionParams {
    pub course_id: i32,
    pub title: String,
    pub position: Option<i32>,
}

impl CreateSectionParams {
    pub fn from_dto(course_id: i32, dto: CreateSectionDto) -> Self {
        Self {
            course_id,
            title: dto.title.trim().to_string(),
            position: dto.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSectionParams {
    pub id: i32,
    pub title: String,
    pub position: i32,
}

impl UpdateSectionParams {
    pub fn from_dto(id: i32, dto: UpdateSectionDto) -> Self {
        Self {
            id,
            title: dto.title.trim().to_string(),
            position: dto.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLessonParams {
    pub section_id: i32,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: Option<i32>,
}

impl CreateLessonParams {
    pub fn from_dto(section_id: i32, dto: CreateLessonDto) -> Self {
        Self {
            section_id,
            title: dto.title.trim().to_string(),
            content: dto.content,
            video_url: dto.video_url,
            duration_seconds: dto.duration_seconds,
            is_preview: dto.is_preview,
            position: dto.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateLessonParams {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_preview: bool,
    pub position: i32,
}

impl UpdateLessonParams {
    pub fn from_dto(id: i32, dto: UpdateLessonDto) -> Self {
        Self {
            id,
            title: dto.title.trim().to_string(),
            content: dto.content,
            video_url: dto.video_url,
            duration_seconds: dto.duration_seconds,
            is_preview: dto.is_preview,
            position: dto.position,
        }
    }
}
