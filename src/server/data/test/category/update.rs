use super::*;

/// Tests renaming without moving.
///
/// Expected: Ok(Some) with new name and untouched closure rows
#[tokio::test]
async fn renames_in_place() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let child = factory::category::create_child_category(db, root.id).await?;

    let repo = CategoryRepository::new(db);
    let updated = repo
        .update(UpdateCategoryParams {
            id: child.id,
            name: "Renamed".to_string(),
            description: Some("New".to_string()),
            parent_id: Some(root.id),
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.slug, child.slug);
    assert_eq!(
        ancestors_of(db, child.id).await?,
        vec![(child.id, 0), (root.id, 1)]
    );

    Ok(())
}

/// Tests moving a subtree under another root.
///
/// Verifies that the moved node and its descendant drop links to the old root and
/// gain links to the new parent's ancestors with the right depths.
///
/// Expected: Ok with closure rows rewritten for the whole subtree
#[tokio::test]
async fn moves_subtree_to_new_parent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old_root = factory::category::create_category(db).await?;
    let moved = factory::category::create_child_category(db, old_root.id).await?;
    let leaf = factory::category::create_child_category(db, moved.id).await?;
    let new_root = factory::category::create_category(db).await?;
    let new_parent = factory::category::create_child_category(db, new_root.id).await?;

    let repo = CategoryRepository::new(db);
    repo.update(UpdateCategoryParams {
        id: moved.id,
        name: moved.name.clone(),
        description: None,
        parent_id: Some(new_parent.id),
    })
    .await?;

    assert_eq!(
        ancestors_of(db, moved.id).await?,
        vec![(moved.id, 0), (new_parent.id, 1), (new_root.id, 2)]
    );
    assert_eq!(
        ancestors_of(db, leaf.id).await?,
        vec![(leaf.id, 0), (moved.id, 1), (new_parent.id, 2), (new_root.id, 3)]
    );
    assert!(repo.get_children(old_root.id).await?.is_empty());

    Ok(())
}

/// Tests detaching a subtree to the root level.
///
/// Expected: Ok with only in-subtree closure rows left
#[tokio::test]
async fn moves_subtree_to_root() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let moved = factory::category::create_child_category(db, root.id).await?;
    let leaf = factory::category::create_child_category(db, moved.id).await?;

    let repo = CategoryRepository::new(db);
    repo.update(UpdateCategoryParams {
        id: moved.id,
        name: moved.name.clone(),
        description: None,
        parent_id: None,
    })
    .await?;

    assert_eq!(ancestors_of(db, moved.id).await?, vec![(moved.id, 0)]);
    assert_eq!(
        ancestors_of(db, leaf.id).await?,
        vec![(leaf.id, 0), (moved.id, 1)]
    );

    Ok(())
}

/// Tests updating a missing category.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let result = repo
        .update(UpdateCategoryParams {
            id: 9,
            name: "Missing".to_string(),
            description: None,
            parent_id: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
