use super::*;

/// Tests course scoping of lesson lookups.
///
/// Expected: Ok through the owning course, Err(NotFound) through another course
#[tokio::test]
async fn scopes_lessons_by_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, lesson) = factory::helpers::create_published_course_with_lesson(db).await?;
    let (_, other) = factory::helpers::create_course_with_instructor(db).await?;

    let service = LessonService::new(db);
    let found = service.get_lesson(course.id, lesson.id).await?;
    assert_eq!(found.id, lesson.id);
    assert_eq!(found.content, lesson.content);

    let result = service.get_lesson(other.id, lesson.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests deleting a lesson.
///
/// Expected: lesson gone afterwards
#[tokio::test]
async fn deletes_lesson() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, lesson) = factory::helpers::create_published_course_with_lesson(db).await?;

    let service = LessonService::new(db);
    service.delete(course.id, lesson.id).await?;

    let result = service.get_lesson(course.id, lesson.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
