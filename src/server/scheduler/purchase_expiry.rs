use chrono::Duration;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::{config::ConfigError, AppError},
    service::purchase::PurchaseService,
};

/// Every five minutes, on the minute.
const EXPIRY_SCHEDULE: &str = "0 */5 * * * *";

/// Starts the job cancelling purchases left pending past their TTL.
///
/// # Arguments
/// - `db` - Database connection
/// - `pending_ttl_minutes` - Minutes a purchase may stay pending
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; dropping it does not stop the job
/// - `Err(ConfigError::InvalidEnvVar)` - `pending_ttl_minutes` is out of range
/// - `Err(AppError::SchedulerErr)` - Failed to create or start the scheduler
pub async fn start_scheduler(
    db: DatabaseConnection,
    pending_ttl_minutes: i64,
) -> Result<JobScheduler, AppError> {
    let ttl = Duration::try_minutes(pending_ttl_minutes).ok_or_else(|| {
        ConfigError::InvalidEnvVar {
            name: "PURCHASE_PENDING_TTL_MINUTES".to_string(),
            reason: "too large".to_string(),
        }
    })?;
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(EXPIRY_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = expire_pending_purchases(&db, ttl).await {
                tracing::error!("Error expiring pending purchases: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(pending_ttl_minutes, "Purchase expiry scheduler started");

    Ok(scheduler)
}

async fn expire_pending_purchases(db: &DatabaseConnection, ttl: Duration) -> Result<(), AppError> {
    PurchaseService::new(db).expire_stale(ttl).await?;

    Ok(())
}
