use entity::purchase::PurchaseStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{course::CourseRepository, purchase::PurchaseRepository},
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        purchase::{CreatePurchaseParams, Purchase, StatusChange},
        user::User,
    },
    service::{
        paypal::{OrderRequest, PayPalClient},
        purchase::PurchaseService,
    },
};

pub struct CheckoutService<'a> {
    db: &'a DatabaseConnection,
    paypal: &'a PayPalClient,
}

impl<'a> CheckoutService<'a> {
    pub fn new(db: &'a DatabaseConnection, paypal: &'a PayPalClient) -> Self {
        Self { db, paypal }
    }

    /// Starts buying a course.
    ///
    /// Free courses complete immediately. Priced courses get a pending purchase and a
    /// PayPal order whose approval URL is stored on the purchase. A pending purchase
    /// that already has an order is returned as is.
    ///
    /// # Arguments
    /// - `buyer` - Signed-in user buying the course
    /// - `course_id` - Course to buy
    /// - `app_url` - Base URL for the PayPal return and cancel pages
    ///
    /// # Returns
    /// - `Ok(Purchase)` - Pending purchase awaiting approval, or a completed free purchase
    /// - `Err(AppError::NotFound)` - Course missing or not published
    /// - `Err(AppError::BadRequest)` - Buyer is the course instructor
    /// - `Err(AppError::Conflict)` - Buyer already owns the course
    /// - `Err(AppError::PaymentErr)` - PayPal failed; the purchase is marked failed
    pub async fn start(
        &self,
        buyer: &User,
        course_id: i32,
        app_url: &str,
    ) -> Result<Purchase, AppError> {
        let repo = PurchaseRepository::new(self.db);

        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .filter(|course| course.is_published())
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;

        if course.instructor_id == buyer.id {
            return Err(AppError::BadRequest(
                "Instructors cannot buy their own course".to_string(),
            ));
        }

        if repo.has_completed(buyer.id, course.id).await? {
            return Err(AppError::Conflict(
                "You already own this course".to_string(),
            ));
        }

        if course.is_free() {
            let purchase = repo
                .create(CreatePurchaseParams {
                    user_id: buyer.id,
                    course_id: course.id,
                    amount_cents: 0,
                    currency: course.currency.clone(),
                    status: PurchaseStatus::Completed,
                })
                .await?;

            tracing::info!(
                purchase_id = purchase.id,
                course_id = course.id,
                user_id = buyer.id,
                "Enrolled in free course"
            );

            return Ok(purchase);
        }

        let pending = repo
            .find_latest_by_status(buyer.id, course.id, PurchaseStatus::Pending)
            .await?;

        let purchase = match pending {
            Some(pending) if pending.provider_order_id.is_some() => return Ok(pending),
            Some(pending) => pending,
            None => {
                repo.create(CreatePurchaseParams {
                    user_id: buyer.id,
                    course_id: course.id,
                    amount_cents: course.price_cents,
                    currency: course.currency.clone(),
                    status: PurchaseStatus::Pending,
                })
                .await?
            }
        };

        let order = self
            .paypal
            .create_order(OrderRequest {
                purchase_id: purchase.id,
                description: &course.title,
                amount_cents: purchase.amount_cents,
                currency: &purchase.currency,
                return_url: format!("{}/purchases/{}?result=approved", app_url, purchase.id),
                cancel_url: format!("{}/purchases/{}?result=cancelled", app_url, purchase.id),
            })
            .await;

        let order = match order {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(purchase_id = purchase.id, "Failed to create PayPal order: {}", e);
                PurchaseService::new(self.db)
                    .apply_status(purchase, PurchaseStatus::Failed, None)
                    .await?;
                return Err(e.into());
            }
        };

        let id = purchase.id;
        repo.set_order(id, order.order_id, order.approval_url)
            .await?
            .ok_or_else(|| {
                InternalError::MissingAfterWrite {
                    entity: "purchase",
                    id,
                }
                .into()
            })
    }

    /// Captures the payment of a purchase on behalf of its buyer.
    ///
    /// # Returns
    /// - `Ok(Purchase)` - Purchase after the capture, unchanged if already completed
    /// - `Err(AuthError::AccessDenied)` - Caller is not the buyer
    /// - `Err(AppError::Conflict)` - Purchase is failed, cancelled or refunded
    /// - `Err(AppError::BadRequest)` - No PayPal order was created yet
    pub async fn capture(&self, buyer: &User, purchase_id: i32) -> Result<Purchase, AppError> {
        let purchase = PurchaseService::new(self.db).get(purchase_id).await?;

        if purchase.user_id != buyer.id {
            return Err(AuthError::AccessDenied(
                buyer.id,
                format!("Only the buyer may capture purchase {}", purchase_id),
            )
            .into());
        }

        match purchase.status {
            PurchaseStatus::Completed => return Ok(purchase),
            PurchaseStatus::Pending => {}
            status => {
                return Err(AppError::Conflict(format!(
                    "Purchase {} is {:?} and cannot be captured",
                    purchase_id, status
                )))
            }
        }

        if purchase.provider_order_id.is_none() {
            return Err(AppError::BadRequest(
                "Purchase has no PayPal order to capture".to_string(),
            ));
        }

        let (_, purchase) = self.capture_purchase(purchase).await?;

        Ok(purchase)
    }

    /// Captures the PayPal order of a pending purchase and applies the result.
    ///
    /// A completed capture completes the purchase, a declined capture fails it and any
    /// other capture status leaves it pending. Purchases that are not pending or have
    /// no order are returned unchanged.
    pub async fn capture_purchase(
        &self,
        purchase: Purchase,
    ) -> Result<(StatusChange, Purchase), AppError> {
        let order_id = match (&purchase.provider_order_id, purchase.status) {
            (Some(order_id), PurchaseStatus::Pending) => order_id.clone(),
            _ => return Ok((StatusChange::Unchanged, purchase)),
        };

        let capture = self.paypal.capture_order(&order_id).await?;
        let purchases = PurchaseService::new(self.db);

        if capture.is_completed() {
            return purchases
                .apply_status(purchase, PurchaseStatus::Completed, capture.capture_id)
                .await;
        }

        if matches!(capture.status.as_str(), "DECLINED" | "FAILED") {
            return purchases
                .apply_status(purchase, PurchaseStatus::Failed, capture.capture_id)
                .await;
        }

        tracing::info!(
            purchase_id = purchase.id,
            status = %capture.status,
            "Capture not completed yet, purchase stays pending"
        );

        Ok((StatusChange::Unchanged, purchase))
    }
}
