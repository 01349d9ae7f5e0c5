use std::collections::HashMap;

use entity::course::CourseStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        category::CategoryRepository, course::CourseRepository, lesson::LessonRepository,
        section::SectionRepository,
    },
    error::AppError,
    middleware::ability::{Ability, Action},
    model::{
        course::{
            Course, CourseDetail, CourseFilter, CreateCourseParams, PaginatedCourses,
            UpdateCourseParams,
        },
        curriculum::{Lesson, SectionOutline},
        total_pages,
    },
    util::{money, slug},
};

/// Longest accepted course title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft course owned by `params.instructor_id`.
    ///
    /// The slug is derived from the title; collisions get a numeric suffix.
    ///
    /// # Returns
    /// - `Ok(Course)` - Created course
    /// - `Err(AppError::BadRequest)` - Invalid title, price or currency
    /// - `Err(AppError::NotFound)` - Category does not exist
    pub async fn create(&self, params: CreateCourseParams) -> Result<Course, AppError> {
        self.validate(
            &params.title,
            params.price_cents,
            &params.currency,
            params.category_id,
        )
        .await?;

        let slug = self.unique_slug(&params.title).await?;
        let course = CourseRepository::new(self.db).create(params, slug).await?;

        tracing::info!(
            course_id = course.id,
            instructor_id = course.instructor_id,
            "Created course"
        );

        Ok(course)
    }

    /// Gets a page of the published catalogue.
    ///
    /// # Arguments
    /// - `filter` - Category (including subcategories) and title search
    pub async fn list_published(
        &self,
        page: u64,
        per_page: u64,
        filter: CourseFilter,
    ) -> Result<PaginatedCourses, AppError> {
        let category_ids = match filter.category_id {
            Some(category_id) => Some(
                CategoryRepository::new(self.db)
                    .descendant_ids(category_id)
                    .await?,
            ),
            None => None,
        };

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let (courses, total) = CourseRepository::new(self.db)
            .get_published_paginated(page, per_page, category_ids, search)
            .await?;

        Ok(PaginatedCourses {
            courses,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Gets every course of an instructor, newest first.
    pub async fn list_by_instructor(&self, instructor_id: i32) -> Result<Vec<Course>, AppError> {
        Ok(CourseRepository::new(self.db)
            .get_by_instructor(instructor_id)
            .await?)
    }

    /// Gets a course with its outline.
    ///
    /// Courses the viewer may not read are reported as missing.
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - Course with sections and lesson summaries
    /// - `Err(AppError::NotFound)` - Course missing or hidden from the viewer
    pub async fn get(&self, id: i32, ability: &Ability) -> Result<CourseDetail, AppError> {
        let course = self.find_visible(id, ability).await?;

        let sections = SectionRepository::new(self.db)
            .get_by_course(course.id)
            .await?;
        let lessons = LessonRepository::new(self.db)
            .get_by_sections(sections.iter().map(|section| section.id).collect())
            .await?;

        let mut by_section: HashMap<i32, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            by_section.entry(lesson.section_id).or_default().push(lesson);
        }

        let sections = sections
            .into_iter()
            .map(|section| SectionOutline {
                lessons: by_section.remove(&section.id).unwrap_or_default(),
                section,
            })
            .collect();

        Ok(CourseDetail { course, sections })
    }

    /// Gets a course the viewer may read, without its outline.
    ///
    /// # Returns
    /// - `Ok(Course)` - Course readable by the viewer
    /// - `Err(AppError::NotFound)` - Course missing or hidden from the viewer
    pub async fn find_visible(&self, id: i32, ability: &Ability) -> Result<Course, AppError> {
        CourseRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|course| ability.can(Action::Read, &course.subject()))
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the editable fields of a course.
    ///
    /// # Returns
    /// - `Ok(Course)` - Updated course
    /// - `Err(AppError::BadRequest)` - Invalid fields, or publishing a course without lessons
    /// - `Err(AppError::NotFound)` - Course or category does not exist
    pub async fn update(&self, params: UpdateCourseParams) -> Result<Course, AppError> {
        let repo = CourseRepository::new(self.db);

        self.validate(
            &params.title,
            params.price_cents,
            &params.currency,
            params.category_id,
        )
        .await?;

        let id = params.id;
        let current = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        if params.status == CourseStatus::Published && repo.lesson_count(id).await? == 0 {
            return Err(AppError::BadRequest(
                "A course needs at least one lesson before it can be published".to_string(),
            ));
        }

        let course = repo.update(params).await?.ok_or_else(|| not_found(id))?;

        if current.status != course.status {
            tracing::info!(
                course_id = id,
                from = ?current.status,
                to = ?course.status,
                "Changed course status"
            );
        }

        Ok(course)
    }

    /// Deletes a course with its curriculum.
    ///
    /// # Returns
    /// - `Ok(())` - Course deleted
    /// - `Err(AppError::Conflict)` - Course has completed or refunded purchases
    /// - `Err(AppError::NotFound)` - Course does not exist
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = CourseRepository::new(self.db);

        if repo.has_settled_purchases(id).await? {
            return Err(AppError::Conflict(
                "Courses with completed or refunded purchases cannot be deleted".to_string(),
            ));
        }

        if !repo.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(course_id = id, "Deleted course");

        Ok(())
    }

    async fn validate(
        &self,
        title: &str,
        price_cents: i64,
        currency: &str,
        category_id: Option<i32>,
    ) -> Result<(), AppError> {
        if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::BadRequest(format!(
                "Course title must be between 1 and {} characters",
                MAX_TITLE_LEN
            )));
        }

        if price_cents < 0 {
            return Err(AppError::BadRequest(
                "Course price must not be negative".to_string(),
            ));
        }

        if !money::is_valid_currency(currency) {
            return Err(AppError::BadRequest(format!(
                "'{}' is not a three letter upper-case currency code",
                currency
            )));
        }

        if let Some(category_id) = category_id {
            if CategoryRepository::new(self.db)
                .find_by_id(category_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound(format!(
                    "Category {} not found",
                    category_id
                )));
            }
        }

        Ok(())
    }

    async fn unique_slug(&self, title: &str) -> Result<String, AppError> {
        let repo = CourseRepository::new(self.db);

        let base = match slug::slugify(title) {
            base if base.is_empty() => "course".to_string(),
            base => base,
        };

        let mut attempt = 0;
        loop {
            let candidate = slug::with_suffix(&base, attempt);
            if !repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Course {} not found", id))
}
