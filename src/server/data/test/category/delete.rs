use super::*;

/// Tests deleting a category with descendants and filed courses.
///
/// Verifies that the whole subtree and its closure rows are removed, courses inside
/// lose their category, and categories outside the subtree survive.
///
/// Expected: Ok(true) with subtree removed and courses detached
#[tokio::test]
async fn deletes_subtree_and_detaches_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let child = factory::category::create_child_category(db, root.id).await?;
    let other = factory::category::create_category(db).await?;
    let instructor = factory::user::create_instructor(db).await?;
    let course = factory::course::CourseFactory::new(db, instructor.id)
        .category(child.id)
        .build()
        .await?;

    let repo = CategoryRepository::new(db);
    assert!(repo.delete(root.id).await?);

    assert!(repo.find_by_id(root.id).await?.is_none());
    assert!(repo.find_by_id(child.id).await?.is_none());
    assert!(repo.find_by_id(other.id).await?.is_some());
    assert!(ancestors_of(db, child.id).await?.is_empty());

    let course = entity::prelude::Course::find_by_id(course.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(course.category_id, None);

    Ok(())
}

/// Tests deleting a missing category.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);

    assert!(!repo.delete(3).await?);

    Ok(())
}
