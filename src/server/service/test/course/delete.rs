use super::*;

/// Tests deleting a course that earned money.
///
/// Expected: Err(Conflict) while a completed purchase exists
#[tokio::test]
async fn rejects_course_with_completed_purchase() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    factory::purchase::PurchaseFactory::new(db, buyer.id, course.id)
        .status(PurchaseStatus::Completed)
        .build()
        .await?;

    let result = CourseService::new(db).delete(course.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a course without settled purchases.
///
/// Expected: Ok, then Err(NotFound) on a second delete
#[tokio::test]
async fn deletes_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;

    let service = CourseService::new(db);
    service.delete(course.id).await?;

    let result = service.delete(course.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
