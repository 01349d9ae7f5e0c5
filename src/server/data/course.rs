use chrono::Utc;
use entity::{course::CourseStatus, purchase::PurchaseStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};

use crate::server::model::course::{Course, CreateCourseParams, UpdateCourseParams};

pub struct CourseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new draft course.
    ///
    /// # Arguments
    /// - `params` - Course fields validated by the service
    /// - `slug` - Unique slug already resolved by the caller
    ///
    /// # Returns
    /// - `Ok(Course)` - The created course
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateCourseParams, slug: String) -> Result<Course, DbErr> {
        let now = Utc::now();

        let entity = entity::course::ActiveModel {
            instructor_id: ActiveValue::Set(params.instructor_id),
            category_id: ActiveValue::Set(params.category_id),
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(params.description),
            price_cents: ActiveValue::Set(params.price_cents),
            currency: ActiveValue::Set(params.currency),
            status: ActiveValue::Set(CourseStatus::Draft),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Course::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Course>, DbErr> {
        let entity = entity::prelude::Course::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Course::from_entity))
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Course::find()
            .filter(entity::course::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets published courses with pagination, ordered by title.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of courses per page
    /// - `category_ids` - Only courses filed under one of these categories
    /// - `search` - Only courses whose title contains this text
    ///
    /// # Returns
    /// - `Ok((courses, total))` - Courses for the requested page and total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_published_paginated(
        &self,
        page: u64,
        per_page: u64,
        category_ids: Option<Vec<i32>>,
        search: Option<&str>,
    ) -> Result<(Vec<Course>, u64), DbErr> {
        let mut query = entity::prelude::Course::find()
            .filter(entity::course::Column::Status.eq(CourseStatus::Published));

        if let Some(ids) = category_ids {
            query = query.filter(entity::course::Column::CategoryId.is_in(ids));
        }

        if let Some(search) = search {
            query = query.filter(entity::course::Column::Title.contains(search));
        }

        let paginator = query
            .order_by_asc(entity::course::Column::Title)
            .order_by_asc(entity::course::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Course::from_entity).collect(), total))
    }

    /// Gets every course of an instructor regardless of status, newest first.
    pub async fn get_by_instructor(&self, instructor_id: i32) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::InstructorId.eq(instructor_id))
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    /// Replaces the editable fields of a course and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Updated course
    /// - `Ok(None)` - Course not found
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateCourseParams) -> Result<Option<Course>, DbErr> {
        let Some(entity) = entity::prelude::Course::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::course::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.price_cents = ActiveValue::Set(params.price_cents);
        active.currency = ActiveValue::Set(params.currency);
        active.category_id = ActiveValue::Set(params.category_id);
        active.status = ActiveValue::Set(params.status);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Course::from_entity(entity)))
    }

    /// Counts the lessons across all sections of a course.
    pub async fn lesson_count(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Lesson::find()
            .join(JoinType::InnerJoin, entity::lesson::Relation::Section.def())
            .filter(entity::section::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    /// Checks for purchases that settled money (completed or refunded).
    pub async fn has_settled_purchases(&self, course_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::CourseId.eq(course_id))
            .filter(
                entity::purchase::Column::Status
                    .is_in([PurchaseStatus::Completed, PurchaseStatus::Refunded]),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Deletes a course with its sections, lessons and unsettled purchases.
    ///
    /// Payment events keep their history but lose the link to deleted purchases.
    ///
    /// # Returns
    /// - `Ok(true)` - Course deleted
    /// - `Ok(false)` - Course not found
    /// - `Err(DbErr)` - Database error; nothing is written
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        if entity::prelude::Course::find_by_id(id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let purchase_ids: Vec<i32> = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::CourseId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|purchase| purchase.id)
            .collect();

        entity::prelude::PaymentEvent::update_many()
            .col_expr(
                entity::payment_event::Column::PurchaseId,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::payment_event::Column::PurchaseId.is_in(purchase_ids.clone()))
            .exec(&txn)
            .await?;

        entity::prelude::Purchase::delete_many()
            .filter(entity::purchase::Column::Id.is_in(purchase_ids))
            .exec(&txn)
            .await?;

        let section_ids: Vec<i32> = entity::prelude::Section::find()
            .filter(entity::section::Column::CourseId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|section| section.id)
            .collect();

        entity::prelude::Lesson::delete_many()
            .filter(entity::lesson::Column::SectionId.is_in(section_ids.clone()))
            .exec(&txn)
            .await?;

        entity::prelude::Section::delete_many()
            .filter(entity::section::Column::Id.is_in(section_ids))
            .exec(&txn)
            .await?;

        entity::prelude::Course::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(true)
    }
}
