//! Purchase lifecycle.
//!
//! `PurchaseService` reads purchases and moves them through the status transition
//! table. `CheckoutService` talks to PayPal to start and capture payments.

pub mod checkout;

use chrono::{Duration, Utc};
use entity::purchase::PurchaseStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::purchase::PurchaseRepository,
    error::AppError,
    model::{
        purchase::{check_transition, PaginatedPurchases, Purchase, StatusChange},
        total_pages,
    },
};

pub struct PurchaseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PurchaseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Purchase, AppError> {
        PurchaseRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Purchase {} not found", id)))
    }

    /// Gets every purchase of a user, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Purchase>, AppError> {
        Ok(PurchaseRepository::new(self.db).get_by_user(user_id).await?)
    }

    /// Gets a page of all purchases, optionally restricted to one status.
    pub async fn list_all(
        &self,
        page: u64,
        per_page: u64,
        status: Option<PurchaseStatus>,
    ) -> Result<PaginatedPurchases, AppError> {
        let (purchases, total) = PurchaseRepository::new(self.db)
            .get_all_paginated(page, per_page, status)
            .await?;

        Ok(PaginatedPurchases {
            purchases,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Moves a purchase to `status` when the transition table allows it.
    ///
    /// The transition is checked against the stored status. When the row moved after
    /// `purchase` was read, the check is repeated on the stored row.
    ///
    /// # Arguments
    /// - `purchase` - Purchase as last read by the caller
    /// - `status` - Requested status
    /// - `capture_id` - Provider capture id to store alongside the change
    ///
    /// # Returns
    /// - `Ok((StatusChange::Allowed, Purchase))` - Status written
    /// - `Ok((StatusChange::Unchanged, Purchase))` - Purchase already had `status`
    /// - `Ok((StatusChange::Rejected, Purchase))` - Transition not allowed, nothing written
    /// - `Err(AppError::NotFound)` - Purchase was deleted
    pub async fn apply_status(
        &self,
        purchase: Purchase,
        status: PurchaseStatus,
        capture_id: Option<String>,
    ) -> Result<(StatusChange, Purchase), AppError> {
        let repo = PurchaseRepository::new(self.db);
        let id = purchase.id;
        let mut current = purchase;

        // Statuses only move forward, so the loop ends after a few retries at most.
        loop {
            match check_transition(current.status, status) {
                StatusChange::Allowed => {
                    let from = current.status;

                    if let Some(updated) = repo
                        .update_status(id, from, status, capture_id.clone())
                        .await?
                    {
                        tracing::info!(purchase_id = id, from = ?from, to = ?status, "Purchase status changed");

                        return Ok((StatusChange::Allowed, updated));
                    }

                    current = repo
                        .find_by_id(id)
                        .await?
                        .ok_or_else(|| AppError::NotFound(format!("Purchase {} not found", id)))?;
                }
                StatusChange::Unchanged => return Ok((StatusChange::Unchanged, current)),
                StatusChange::Rejected => {
                    tracing::warn!(
                        purchase_id = id,
                        from = ?current.status,
                        to = ?status,
                        "Rejected purchase status transition"
                    );

                    return Ok((StatusChange::Rejected, current));
                }
            }
        }
    }

    /// Cancels pending purchases older than `ttl`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of purchases cancelled
    pub async fn expire_stale(&self, ttl: Duration) -> Result<u64, AppError> {
        // A cutoff before the earliest representable time matches nothing.
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return Ok(0);
        };
        let cancelled = PurchaseRepository::new(self.db)
            .cancel_pending_before(cutoff)
            .await?;

        if cancelled > 0 {
            tracing::info!(cancelled, "Cancelled stale pending purchases");
        } else {
            tracing::debug!("No stale pending purchases");
        }

        Ok(cancelled)
    }
}
