use super::*;

/// Tests the category filter of the catalogue.
///
/// Expected: courses in the category and its subcategories only
#[tokio::test]
async fn includes_subcategories() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::user::create_instructor(db).await?;
    let programming = factory::category::create_category(db).await?;
    let rust = factory::category::create_child_category(db, programming.id).await?;
    let design = factory::category::create_category(db).await?;

    for (title, category_id) in [
        ("Alpha", programming.id),
        ("Beta", rust.id),
        ("Gamma", design.id),
    ] {
        factory::course::CourseFactory::new(db, instructor.id)
            .title(title)
            .category(category_id)
            .status(CourseStatus::Published)
            .build()
            .await?;
    }

    let page = CourseService::new(db)
        .list_published(
            0,
            10,
            CourseFilter {
                category_id: Some(programming.id),
                search: None,
            },
        )
        .await?;

    let titles: Vec<&str> = page.courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 1);

    Ok(())
}

/// Tests the title search of the catalogue.
///
/// Expected: drafts excluded, blank search ignored
#[tokio::test]
async fn searches_published_titles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::user::create_instructor(db).await?;
    for (title, status) in [
        ("Async Rust", CourseStatus::Published),
        ("Rust Macros", CourseStatus::Draft),
        ("Go Basics", CourseStatus::Published),
    ] {
        factory::course::CourseFactory::new(db, instructor.id)
            .title(title)
            .status(status)
            .build()
            .await?;
    }

    let service = CourseService::new(db);
    let found = service
        .list_published(
            0,
            10,
            CourseFilter {
                category_id: None,
                search: Some("Rust".to_string()),
            },
        )
        .await?;
    assert_eq!(found.total, 1);
    assert_eq!(found.courses[0].title, "Async Rust");

    let all = service
        .list_published(
            0,
            10,
            CourseFilter {
                category_id: None,
                search: Some("   ".to_string()),
            },
        )
        .await?;
    assert_eq!(all.total, 2);

    Ok(())
}
