use super::*;

/// Tests a completed capture event.
///
/// Expected: purchase completed, event recorded as applied
#[tokio::test]
async fn applies_completed_capture() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-1")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event(
                "WH-1",
                "PAYMENT.CAPTURE.COMPLETED",
                capture_resource(purchase.id, "CAPTURE-1", "19.99"),
            ),
        )
        .await?;

    assert_eq!(ack.event_id, "WH-1");
    assert_eq!(ack.outcome, WebhookOutcome::Applied);

    let updated = PurchaseService::new(db).get(purchase.id).await?;
    assert_eq!(updated.status, PurchaseStatus::Completed);
    assert_eq!(updated.provider_capture_id.as_deref(), Some("CAPTURE-1"));

    let recorded = entity::prelude::PaymentEvent::find().all(db).await?;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].outcome, "applied");
    assert_eq!(recorded[0].purchase_id, Some(purchase.id));
    assert_eq!(recorded[0].resource_id.as_deref(), Some("CAPTURE-1"));

    Ok(())
}

/// Tests replaying an event.
///
/// Expected: second delivery is a duplicate and records nothing new
#[tokio::test]
async fn deduplicates_replayed_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;
    let paypal = paypal_client(&server);
    let service = WebhookService::new(db, &paypal);
    let body = event(
        "WH-2",
        "PAYMENT.CAPTURE.COMPLETED",
        capture_resource(purchase.id, "CAPTURE-2", "19.99"),
    );

    let first = service.handle(&transmission_headers(), &body).await?;
    let second = service.handle(&transmission_headers(), &body).await?;

    assert_eq!(first.outcome, WebhookOutcome::Applied);
    assert_eq!(second.outcome, WebhookOutcome::Duplicate);
    assert_eq!(entity::prelude::PaymentEvent::find().count(db).await?, 1);

    Ok(())
}

/// Tests a capture whose amount differs from the purchase.
///
/// Expected: outcome rejected and the purchase stays pending
#[tokio::test]
async fn rejects_amount_mismatch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;
    let paypal = paypal_client(&server);

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event(
                "WH-3",
                "PAYMENT.CAPTURE.COMPLETED",
                capture_resource(purchase.id, "CAPTURE-3", "1.00"),
            ),
        )
        .await?;

    assert_eq!(ack.outcome, WebhookOutcome::Rejected);
    assert_eq!(
        PurchaseService::new(db).get(purchase.id).await?.status,
        PurchaseStatus::Pending
    );

    Ok(())
}

/// Tests a refund of a completed purchase.
///
/// Expected: purchase refunded
#[tokio::test]
async fn refunds_completed_purchase() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Completed)
        .provider_capture_id("CAPTURE-4")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event(
                "WH-4",
                "PAYMENT.CAPTURE.REFUNDED",
                json!({ "id": "CAPTURE-4", "status": "REFUNDED" }),
            ),
        )
        .await?;

    assert_eq!(ack.outcome, WebhookOutcome::Applied);
    assert_eq!(
        PurchaseService::new(db).get(purchase.id).await?.status,
        PurchaseStatus::Refunded
    );

    Ok(())
}

/// Tests an approved order event.
///
/// Expected: order captured at PayPal and the purchase completed
#[tokio::test]
async fn captures_approved_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;
    mock_capture(&server, "ORDER-5", "CAPTURE-5", "COMPLETED").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-5")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event(
                "WH-5",
                "CHECKOUT.ORDER.APPROVED",
                json!({ "id": "ORDER-5", "status": "APPROVED" }),
            ),
        )
        .await?;

    assert_eq!(ack.outcome, WebhookOutcome::Applied);
    let updated = PurchaseService::new(db).get(purchase.id).await?;
    assert_eq!(updated.status, PurchaseStatus::Completed);
    assert_eq!(updated.provider_capture_id.as_deref(), Some("CAPTURE-5"));

    Ok(())
}

/// Tests an event type the marketplace does not handle.
///
/// Expected: outcome ignored and the event recorded
#[tokio::test]
async fn ignores_unhandled_event_types() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;
    let paypal = paypal_client(&server);

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event("WH-6", "BILLING.PLAN.CREATED", json!({ "id": "P-1" })),
        )
        .await?;

    assert_eq!(ack.outcome, WebhookOutcome::Ignored);
    assert_eq!(entity::prelude::PaymentEvent::find().count(db).await?, 1);

    Ok(())
}

/// Tests a delivery PayPal does not verify.
///
/// Expected: Err(SignatureVerificationFailed) and nothing recorded
#[tokio::test]
async fn rejects_unverified_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "FAILURE").await;
    let paypal = paypal_client(&server);

    let result = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event("WH-7", "PAYMENT.CAPTURE.COMPLETED", json!({ "id": "C" })),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(
            PaymentError::SignatureVerificationFailed(_)
        ))
    ));
    assert_eq!(entity::prelude::PaymentEvent::find().count(db).await?, 0);

    Ok(())
}

/// Tests a delivery without transmission headers.
///
/// Expected: Err(MissingWebhookHeader) before PayPal is called
#[tokio::test]
async fn rejects_missing_headers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    let paypal = paypal_client(&server);

    let result = WebhookService::new(db, &paypal)
        .handle(
            &HeaderMap::new(),
            &event("WH-8", "PAYMENT.CAPTURE.COMPLETED", json!({ "id": "C" })),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::MissingWebhookHeader(
            "paypal-transmission-id"
        )))
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());

    Ok(())
}

/// Tests a body that is not JSON.
///
/// Expected: Err(MalformedEvent)
#[tokio::test]
async fn rejects_malformed_body() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    let paypal = paypal_client(&server);

    let result = WebhookService::new(db, &paypal)
        .handle(&transmission_headers(), b"not json")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::MalformedEvent(_)))
    ));

    Ok(())
}

/// Tests a delivery arriving while another delivery of the same event is processing.
///
/// Expected: duplicate without capturing the order a second time
#[tokio::test]
async fn skips_event_claimed_by_concurrent_delivery() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/ORDER-9/capture"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-9")
        .build()
        .await?;
    let paypal = paypal_client(&server);

    PaymentEventRepository::new(db)
        .claim(ClaimPaymentEventParams {
            provider_event_id: "WH-9".to_string(),
            event_type: "CHECKOUT.ORDER.APPROVED".to_string(),
            resource_id: Some("ORDER-9".to_string()),
            payload: "{}".to_string(),
        })
        .await?;

    let ack = WebhookService::new(db, &paypal)
        .handle(
            &transmission_headers(),
            &event(
                "WH-9",
                "CHECKOUT.ORDER.APPROVED",
                json!({ "id": "ORDER-9", "status": "APPROVED" }),
            ),
        )
        .await?;

    assert_eq!(ack.outcome, WebhookOutcome::Duplicate);
    assert_eq!(
        PurchaseService::new(db).get(purchase.id).await?.status,
        PurchaseStatus::Pending
    );
    assert_eq!(entity::prelude::PaymentEvent::find().count(db).await?, 1);

    Ok(())
}

/// Tests a delivery whose processing fails, followed by the provider's retry.
///
/// Expected: first delivery errors and leaves no record, the retry is applied
#[tokio::test]
async fn retries_event_after_failed_processing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    mock_token(&server).await;
    mock_verification(&server, "SUCCESS").await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/ORDER-10/capture"))
        .respond_with(ResponseTemplate::new(500).set_body_string("INTERNAL_SERVICE_ERROR"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mock_capture(&server, "ORDER-10", "CAPTURE-10", "COMPLETED").await;

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .provider_order_id("ORDER-10")
        .build()
        .await?;
    let paypal = paypal_client(&server);
    let service = WebhookService::new(db, &paypal);
    let body = event(
        "WH-10",
        "CHECKOUT.ORDER.APPROVED",
        json!({ "id": "ORDER-10", "status": "APPROVED" }),
    );

    let first = service.handle(&transmission_headers(), &body).await;
    assert!(matches!(
        first,
        Err(AppError::PaymentErr(PaymentError::Provider { status: 500, .. }))
    ));
    assert_eq!(entity::prelude::PaymentEvent::find().count(db).await?, 0);

    let retry = service.handle(&transmission_headers(), &body).await?;
    assert_eq!(retry.outcome, WebhookOutcome::Applied);
    assert_eq!(
        PurchaseService::new(db).get(purchase.id).await?.status,
        PurchaseStatus::Completed
    );

    Ok(())
}
