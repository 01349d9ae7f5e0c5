use super::*;

/// Tests appending sections without explicit positions.
///
/// Expected: Ok with positions following the current maximum
#[tokio::test]
async fn appends_after_last_section() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_course_with_instructor(db).await?;
    factory::section::SectionFactory::new(db, course.id)
        .position(4)
        .build()
        .await?;

    let repo = SectionRepository::new(db);
    let section = repo
        .create(CreateSectionParams {
            course_id: course.id,
            title: "Getting Started".to_string(),
            position: None,
        })
        .await?;

    assert_eq!(section.position, 5);
    assert_eq!(section.title, "Getting Started");

    Ok(())
}

/// Tests the first section of a course and an explicit position.
///
/// Expected: Ok with position 1 for the first, given position for the second
#[tokio::test]
async fn starts_at_one_or_uses_given_position() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_course_with_instructor(db).await?;

    let repo = SectionRepository::new(db);
    let first = repo
        .create(CreateSectionParams {
            course_id: course.id,
            title: "One".to_string(),
            position: None,
        })
        .await?;
    let pinned = repo
        .create(CreateSectionParams {
            course_id: course.id,
            title: "Zero".to_string(),
            position: Some(0),
        })
        .await?;

    assert_eq!(first.position, 1);
    assert_eq!(pinned.position, 0);

    let ordered = repo.get_by_course(course.id).await?;
    assert_eq!(
        ordered.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![pinned.id, first.id]
    );

    Ok(())
}
