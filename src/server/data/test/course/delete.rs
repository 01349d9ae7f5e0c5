use super::*;

/// Tests deleting a course with content and an abandoned purchase.
///
/// Verifies that sections, lessons and unsettled purchases go with the course while
/// recorded payment events stay with their purchase link cleared.
///
/// Expected: Ok(true) with dependent rows removed
#[tokio::test]
async fn deletes_course_with_content() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;
    entity::prelude::PaymentEvent::insert(entity::payment_event::ActiveModel {
        provider_event_id: sea_orm::ActiveValue::Set("WH-1".to_string()),
        event_type: sea_orm::ActiveValue::Set("CHECKOUT.ORDER.VOIDED".to_string()),
        resource_id: sea_orm::ActiveValue::Set(None),
        purchase_id: sea_orm::ActiveValue::Set(Some(purchase.id)),
        outcome: sea_orm::ActiveValue::Set("applied".to_string()),
        payload: sea_orm::ActiveValue::Set("{}".to_string()),
        received_at: sea_orm::ActiveValue::Set(chrono::Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await?;

    let repo = CourseRepository::new(db);
    assert!(!repo.has_settled_purchases(course.id).await?);
    assert!(repo.delete(course.id).await?);

    assert!(repo.find_by_id(course.id).await?.is_none());
    assert_eq!(entity::prelude::Section::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Lesson::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Purchase::find().count(db).await?, 0);

    let events = entity::prelude::PaymentEvent::find().all(db).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].purchase_id, None);

    Ok(())
}

/// Tests settled purchase detection.
///
/// Expected: Ok(true) once a refunded purchase exists
#[tokio::test]
async fn detects_settled_purchases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Refunded)
        .build()
        .await?;

    let repo = CourseRepository::new(db);

    assert!(repo.has_settled_purchases(course.id).await?);

    Ok(())
}

/// Tests deleting a missing course.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);

    assert!(!repo.delete(5).await?);

    Ok(())
}
