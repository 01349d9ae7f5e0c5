use super::*;

/// Tests deleting a lesson.
///
/// Expected: Ok(true) once, Ok(false) afterwards
#[tokio::test]
async fn deletes_lesson_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, lesson) = factory::helpers::create_published_course_with_lesson(db).await?;

    let repo = LessonRepository::new(db);

    assert!(repo.delete(lesson.id).await?);
    assert!(!repo.delete(lesson.id).await?);
    assert!(repo.find_in_course(course.id, lesson.id).await?.is_none());

    Ok(())
}
