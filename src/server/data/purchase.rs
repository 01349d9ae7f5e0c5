use chrono::{DateTime, Utc};
use entity::purchase::PurchaseStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::purchase::{CreatePurchaseParams, Purchase};

pub struct PurchaseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PurchaseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a purchase with the given initial status.
    ///
    /// `completed_at` is set when the purchase starts out completed.
    ///
    /// # Arguments
    /// - `params` - Buyer, course, price snapshot and status
    ///
    /// # Returns
    /// - `Ok(Purchase)` - The created purchase
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreatePurchaseParams) -> Result<Purchase, DbErr> {
        let now = Utc::now();
        let completed_at = (params.status == PurchaseStatus::Completed).then_some(now);

        let entity = entity::purchase::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            course_id: ActiveValue::Set(params.course_id),
            amount_cents: ActiveValue::Set(params.amount_cents),
            currency: ActiveValue::Set(params.currency),
            status: ActiveValue::Set(params.status),
            provider_order_id: ActiveValue::Set(None),
            provider_capture_id: ActiveValue::Set(None),
            approval_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(completed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Purchase::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Purchase>, DbErr> {
        let entity = entity::prelude::Purchase::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Purchase::from_entity))
    }

    /// Finds the purchase linked to a provider order.
    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Purchase>, DbErr> {
        let entity = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::ProviderOrderId.eq(order_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Purchase::from_entity))
    }

    /// Finds the purchase linked to a provider capture.
    pub async fn find_by_capture_id(&self, capture_id: &str) -> Result<Option<Purchase>, DbErr> {
        let entity = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::ProviderCaptureId.eq(capture_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Purchase::from_entity))
    }

    /// Finds the most recent purchase of a course by a user in the given status.
    pub async fn find_latest_by_status(
        &self,
        user_id: i32,
        course_id: i32,
        status: PurchaseStatus,
    ) -> Result<Option<Purchase>, DbErr> {
        let entity = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::UserId.eq(user_id))
            .filter(entity::purchase::Column::CourseId.eq(course_id))
            .filter(entity::purchase::Column::Status.eq(status))
            .order_by_desc(entity::purchase::Column::CreatedAt)
            .order_by_desc(entity::purchase::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(Purchase::from_entity))
    }

    /// Checks whether the user owns the course through a completed purchase.
    pub async fn has_completed(&self, user_id: i32, course_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::UserId.eq(user_id))
            .filter(entity::purchase::Column::CourseId.eq(course_id))
            .filter(entity::purchase::Column::Status.eq(PurchaseStatus::Completed))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets every purchase of a user, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Purchase>, DbErr> {
        let entities = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::UserId.eq(user_id))
            .order_by_desc(entity::purchase::Column::CreatedAt)
            .order_by_desc(entity::purchase::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Purchase::from_entity).collect())
    }

    /// Gets all purchases with pagination, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of purchases per page
    /// - `status` - Only purchases in this status
    ///
    /// # Returns
    /// - `Ok((purchases, total))` - Purchases for the page and total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
        status: Option<PurchaseStatus>,
    ) -> Result<(Vec<Purchase>, u64), DbErr> {
        let mut query = entity::prelude::Purchase::find();

        if let Some(status) = status {
            query = query.filter(entity::purchase::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_desc(entity::purchase::Column::CreatedAt)
            .order_by_desc(entity::purchase::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(Purchase::from_entity).collect(),
            total,
        ))
    }

    /// Stores the provider order created for a purchase.
    ///
    /// # Returns
    /// - `Ok(Some(Purchase))` - Updated purchase
    /// - `Ok(None)` - Purchase not found
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_order(
        &self,
        id: i32,
        order_id: String,
        approval_url: Option<String>,
    ) -> Result<Option<Purchase>, DbErr> {
        let Some(entity) = entity::prelude::Purchase::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::purchase::ActiveModel = entity.into();
        active.provider_order_id = ActiveValue::Set(Some(order_id));
        active.approval_url = ActiveValue::Set(approval_url);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Purchase::from_entity(entity)))
    }

    /// Moves a purchase from `from` to `status`, keeping an existing capture id when
    /// none is given.
    ///
    /// The write only happens while the stored status is still `from`. Moving to
    /// `Completed` stamps `completed_at`. Transition rules are checked by the caller.
    ///
    /// # Returns
    /// - `Ok(Some(Purchase))` - Updated purchase
    /// - `Ok(None)` - Purchase not found or no longer in `from`
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_status(
        &self,
        id: i32,
        from: PurchaseStatus,
        status: PurchaseStatus,
        capture_id: Option<String>,
    ) -> Result<Option<Purchase>, DbErr> {
        let now = Utc::now();
        let mut update = entity::prelude::Purchase::update_many()
            .col_expr(entity::purchase::Column::Status, Expr::value(status))
            .col_expr(entity::purchase::Column::UpdatedAt, Expr::value(now));

        if status == PurchaseStatus::Completed {
            update = update.col_expr(entity::purchase::Column::CompletedAt, Expr::value(now));
        }

        if let Some(capture_id) = capture_id {
            update = update.col_expr(
                entity::purchase::Column::ProviderCaptureId,
                Expr::value(capture_id),
            );
        }

        let result = update
            .filter(entity::purchase::Column::Id.eq(id))
            .filter(entity::purchase::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Cancels pending purchases created before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of purchases cancelled
    /// - `Err(DbErr)` - Database error during update
    pub async fn cancel_pending_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Purchase::update_many()
            .col_expr(
                entity::purchase::Column::Status,
                Expr::value(PurchaseStatus::Cancelled),
            )
            .col_expr(entity::purchase::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::purchase::Column::Status.eq(PurchaseStatus::Pending))
            .filter(entity::purchase::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
