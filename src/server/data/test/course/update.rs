use super::*;

/// Tests replacing course fields.
///
/// Expected: Ok(Some) with every editable field replaced and slug kept
#[tokio::test]
async fn replaces_editable_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_course_with_instructor(db).await?;

    let repo = CourseRepository::new(db);
    let updated = repo
        .update(UpdateCourseParams {
            id: course.id,
            title: "New Title".to_string(),
            description: "New description".to_string(),
            price_cents: 0,
            currency: "GBP".to_string(),
            category_id: None,
            status: CourseStatus::Published,
        })
        .await?
        .unwrap();

    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.slug, course.slug);
    assert_eq!(updated.price_cents, 0);
    assert_eq!(updated.currency, "GBP");
    assert_eq!(updated.status, CourseStatus::Published);
    assert!(updated.updated_at >= course.updated_at);

    Ok(())
}

/// Tests updating a missing course.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CourseRepository::new(db);
    let result = repo
        .update(UpdateCourseParams {
            id: 77,
            title: "Missing".to_string(),
            description: String::new(),
            price_cents: 100,
            currency: "USD".to_string(),
            category_id: None,
            status: CourseStatus::Draft,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
