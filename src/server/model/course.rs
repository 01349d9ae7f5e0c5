//! Course domain models and parameters.

use chrono::{DateTime, Utc};
use entity::course::CourseStatus;

use crate::{
    model::course::{
        CourseDetailDto, CourseDto, CourseStatusDto, CreateCourseDto, PaginatedCoursesDto,
        UpdateCourseDto,
    },
    server::{
        middleware::ability::{Ability, Subject},
        model::curriculum::SectionOutline,
        util::{links, money},
    },
};

/// Currency used when a new course does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub instructor_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn from_entity(entity: entity::course::Model) -> Self {
        Self {
            id: entity.id,
            instructor_id: entity.instructor_id,
            category_id: entity.category_id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            price_cents: entity.price_cents,
            currency: entity.currency,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }

    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Ability subject describing this course.
    pub fn subject(&self) -> Subject {
        Subject::Course {
            instructor_id: self.instructor_id,
            published: self.is_published(),
        }
    }

    /// Converts to a DTO, attaching the links the viewer may follow.
    pub fn into_dto(self, ability: &Ability) -> CourseDto {
        let links = links::course_links(&self, ability);

        CourseDto {
            id: self.id,
            instructor_id: self.instructor_id,
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            price: money::format_amount(self.price_cents),
            price_cents: self.price_cents,
            currency: self.currency,
            status: self.status.into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            links,
        }
    }
}

/// Course together with its outline.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    pub sections: Vec<SectionOutline>,
}

impl CourseDetail {
    pub fn into_dto(self, ability: &Ability) -> CourseDetailDto {
        let sections = self
            .sections
            .into_iter()
            .map(|section| section.into_dto(&self.course, ability))
            .collect();

        CourseDetailDto {
            course: self.course.into_dto(ability),
            sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedCourses {
    pub courses: Vec<Course>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCourses {
    pub fn into_dto(self, ability: &Ability) -> PaginatedCoursesDto {
        PaginatedCoursesDto {
            items: self
                .courses
                .into_iter()
                .map(|course| course.into_dto(ability))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Filters for the public course catalogue.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Restrict to this category and all of its descendants.
    pub category_id: Option<i32>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCourseParams {
    pub instructor_id: i32,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub category_id: Option<i32>,
}

impl CreateCourseParams {
    pub fn from_dto(instructor_id: i32, dto: CreateCourseDto) -> Self {
        Self {
            instructor_id,
            title: dto.title.trim().to_string(),
            description: dto.description,
            price_cents: dto.price_cents,
            currency: dto
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            category_id: dto.category_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCourseParams {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub category_id: Option<i32>,
    pub status: CourseStatus,
}

impl UpdateCourseParams {
    pub fn from_dto(id: i32, dto: UpdateCourseDto) -> Self {
        Self {
            id,
            title: dto.title.trim().to_string(),
            description: dto.description,
            price_cents: dto.price_cents,
            currency: dto.currency,
            category_id: dto.category_id,
            status: dto.status.into(),
        }
    }
}

impl From<CourseStatus> for CourseStatusDto {
    fn from(status: CourseStatus) -> Self {
        match status {
            CourseStatus::Draft => CourseStatusDto::Draft,
            CourseStatus::Published => CourseStatusDto::Published,
            CourseStatus::Archived => CourseStatusDto::Archived,
        }
    }
}

impl From<CourseStatusDto> for CourseStatus {
    fn from(status: CourseStatusDto) -> Self {
        match status {
            CourseStatusDto::Draft => CourseStatus::Draft,
            CourseStatusDto::Published => CourseStatus::Published,
            CourseStatusDto::Archived => CourseStatus::Archived,
        }
    }
}
