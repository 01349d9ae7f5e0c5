use super::*;

/// Tests capturing an approved order as the buyer.
///
/// Expected: purchase completed with the capture id
#[tokio::test]
async fn completes_purchase_on_completed_capture() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_capture(&server, "ORDER-7", "CAPTURE-7", "COMPLETED").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-7")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let captured = CheckoutService::new(db, &paypal)
        .capture(&User::from_entity(buyer), purchase.id)
        .await?;

    assert_eq!(captured.status, PurchaseStatus::Completed);
    assert_eq!(captured.provider_capture_id.as_deref(), Some("CAPTURE-7"));

    Ok(())
}

/// Tests capturing a purchase that is already completed.
///
/// Expected: purchase returned unchanged without calling PayPal
#[tokio::test]
async fn returns_completed_purchase_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Completed)
        .provider_order_id("ORDER-8")
        .provider_capture_id("CAPTURE-8")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let captured = CheckoutService::new(db, &paypal)
        .capture(&User::from_entity(buyer), purchase.id)
        .await?;

    assert_eq!(captured.status, PurchaseStatus::Completed);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());

    Ok(())
}

/// Tests capturing someone else's purchase.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn rejects_non_buyer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-9")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let result = CheckoutService::new(db, &paypal)
        .capture(&User::from_entity(stranger), purchase.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests a declined capture.
///
/// Expected: purchase marked failed
#[tokio::test]
async fn fails_purchase_on_declined_capture() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_capture(&server, "ORDER-10", "CAPTURE-10", "DECLINED").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-10")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let captured = CheckoutService::new(db, &paypal)
        .capture(&User::from_entity(buyer), purchase.id)
        .await?;

    assert_eq!(captured.status, PurchaseStatus::Failed);

    Ok(())
}
