use super::*;

/// Tests the pending purchase expiry job.
///
/// Expected: only pending purchases older than the TTL are cancelled
#[tokio::test]
async fn cancels_only_stale_pending_purchases() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let old = Utc::now() - Duration::hours(3);

    let stale = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .created_at(old)
        .build()
        .await?;
    let fresh = factory::purchase::create_purchase(db, buyer.id, course.id).await?;
    let completed = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Completed)
        .created_at(old)
        .build()
        .await?;

    let service = PurchaseService::new(db);
    let cancelled = service.expire_stale(Duration::minutes(60)).await?;

    assert_eq!(cancelled, 1);
    assert_eq!(service.get(stale.id).await?.status, PurchaseStatus::Cancelled);
    assert_eq!(service.get(fresh.id).await?.status, PurchaseStatus::Pending);
    assert_eq!(
        service.get(completed.id).await?.status,
        PurchaseStatus::Completed
    );

    Ok(())
}

/// Tests a TTL reaching past the earliest representable time.
///
/// Expected: Ok(0) without touching pending purchases
#[tokio::test]
async fn ttl_beyond_date_range_cancels_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let pending = factory::purchase::create_purchase(db, buyer.id, course.id).await?;

    let service = PurchaseService::new(db);
    let cancelled = service.expire_stale(Duration::MAX).await?;

    assert_eq!(cancelled, 0);
    assert_eq!(service.get(pending.id).await?.status, PurchaseStatus::Pending);

    Ok(())
}
