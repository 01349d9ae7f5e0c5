use super::*;

/// Tests completing a purchase with a capture id.
///
/// Expected: Ok(Some) with completed status, capture id and completion time
#[tokio::test]
async fn completes_with_capture_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;

    let repo = PurchaseRepository::new(db);
    let updated = repo
        .update_status(
            purchase.id,
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            Some("CAPTURE-1".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, PurchaseStatus::Completed);
    assert_eq!(updated.provider_capture_id.as_deref(), Some("CAPTURE-1"));
    assert!(updated.completed_at.is_some());

    Ok(())
}

/// Tests refunding keeps the capture id and completion time.
///
/// Expected: Ok(Some) with refunded status and earlier capture data intact
#[tokio::test]
async fn refund_keeps_capture_data() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Completed)
        .provider_capture_id("CAPTURE-2")
        .build()
        .await?;

    let repo = PurchaseRepository::new(db);
    let updated = repo
        .update_status(
            purchase.id,
            PurchaseStatus::Completed,
            PurchaseStatus::Refunded,
            None,
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, PurchaseStatus::Refunded);
    assert_eq!(updated.provider_capture_id.as_deref(), Some("CAPTURE-2"));
    assert!(updated.completed_at.is_some());

    Ok(())
}

/// Tests writing over a status that moved since it was read.
///
/// Expected: Ok(None) and the stored cancelled status kept
#[tokio::test]
async fn skips_when_status_moved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Cancelled)
        .build()
        .await?;

    let repo = PurchaseRepository::new(db);
    let updated = repo
        .update_status(
            purchase.id,
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            Some("CAPTURE-3".to_string()),
        )
        .await?;

    assert!(updated.is_none());

    let stored = repo.find_by_id(purchase.id).await?.unwrap();
    assert_eq!(stored.status, PurchaseStatus::Cancelled);
    assert!(stored.provider_capture_id.is_none());
    assert!(stored.completed_at.is_none());

    Ok(())
}
