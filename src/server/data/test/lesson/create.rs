use super::*;

/// Tests creating lessons in a section.
///
/// Verifies that lessons are appended per section and keep their optional fields.
///
/// Expected: Ok with positions 1 and 2
#[tokio::test]
async fn appends_lessons_within_section() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_course_with_instructor(db).await?;
    let section = factory::section::create_section(db, course.id).await?;
    let other_section = factory::section::create_section(db, course.id).await?;
    factory::lesson::LessonFactory::new(db, other_section.id)
        .position(9)
        .build()
        .await?;

    let repo = LessonRepository::new(db);
    let params = |title: &str| CreateLessonParams {
        section_id: section.id,
        title: title.to_string(),
        content: "# Hello".to_string(),
        video_url: Some("https://video.test/1".to_string()),
        duration_seconds: Some(300),
        is_preview: true,
        position: None,
    };

    let first = repo.create(params("First")).await?;
    let second = repo.create(params("Second")).await?;

    assert_eq!(first.position, 1);
    assert_eq!(second.position, 2);
    assert_eq!(first.content, "# Hello");
    assert_eq!(first.video_url.as_deref(), Some("https://video.test/1"));
    assert_eq!(first.duration_seconds, Some(300));
    assert!(first.is_preview);

    Ok(())
}
