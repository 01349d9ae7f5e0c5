use super::*;

/// Tests creating a course.
///
/// Verifies that new courses always start as drafts with the given price snapshot.
///
/// Expected: Ok with draft course
#[tokio::test]
async fn creates_draft_course() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::user::create_instructor(db).await?;
    let category = factory::category::create_category(db).await?;

    let repo = CourseRepository::new(db);
    let course = repo
        .create(
            CreateCourseParams {
                instructor_id: instructor.id,
                title: "Intro to Rust".to_string(),
                description: "Ownership and borrowing".to_string(),
                price_cents: 4900,
                currency: "EUR".to_string(),
                category_id: Some(category.id),
            },
            "intro-to-rust".to_string(),
        )
        .await?;

    assert_eq!(course.instructor_id, instructor.id);
    assert_eq!(course.slug, "intro-to-rust");
    assert_eq!(course.status, CourseStatus::Draft);
    assert_eq!(course.price_cents, 4900);
    assert_eq!(course.currency, "EUR");
    assert_eq!(course.category_id, Some(category.id));
    assert!(repo.slug_exists("intro-to-rust").await?);
    assert!(!repo.slug_exists("intro-to-rust-2").await?);

    Ok(())
}
