use super::*;

/// Tests replacing lesson fields.
///
/// Expected: Ok(Some) with every field replaced
#[tokio::test]
async fn replaces_lesson_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, lesson) = factory::helpers::create_published_course_with_lesson(db).await?;

    let repo = LessonRepository::new(db);
    let updated = repo
        .update(UpdateLessonParams {
            id: lesson.id,
            title: "Borrowing".to_string(),
            content: "Shared and mutable".to_string(),
            video_url: None,
            duration_seconds: Some(90),
            is_preview: true,
            position: 7,
        })
        .await?
        .unwrap();

    assert_eq!(updated.title, "Borrowing");
    assert_eq!(updated.content, "Shared and mutable");
    assert_eq!(updated.video_url, None);
    assert_eq!(updated.duration_seconds, Some(90));
    assert!(updated.is_preview);
    assert_eq!(updated.position, 7);

    assert!(repo
        .update(UpdateLessonParams {
            id: lesson.id + 50,
            title: "Missing".to_string(),
            content: String::new(),
            video_url: None,
            duration_seconds: None,
            is_preview: false,
            position: 1,
        })
        .await?
        .is_none());

    Ok(())
}
