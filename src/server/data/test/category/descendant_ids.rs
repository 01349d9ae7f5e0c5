use super::*;

/// Tests collecting a subtree.
///
/// Expected: Ok with the category and every descendant, nothing from sibling trees
#[tokio::test]
async fn includes_self_and_descendants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let child = factory::category::create_child_category(db, root.id).await?;
    let grandchild = factory::category::create_child_category(db, child.id).await?;
    let other = factory::category::create_category(db).await?;

    let repo = CategoryRepository::new(db);
    let mut ids = repo.descendant_ids(root.id).await?;
    ids.sort();

    assert_eq!(ids, vec![root.id, child.id, grandchild.id]);
    assert!(!ids.contains(&other.id));
    assert!(repo.is_descendant(root.id, grandchild.id).await?);
    assert!(!repo.is_descendant(grandchild.id, root.id).await?);

    Ok(())
}

/// Tests a missing category.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_for_missing_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);

    assert!(repo.descendant_ids(42).await?.is_empty());

    Ok(())
}
