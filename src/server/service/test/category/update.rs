use super::*;

fn update_params(id: i32, name: &str, parent_id: Option<i32>) -> UpdateCategoryParams {
    UpdateCategoryParams {
        id,
        name: name.to_string(),
        description: None,
        parent_id,
    }
}

/// Tests moving a category below its own descendant.
///
/// Expected: Err(BadRequest) and the tree is unchanged
#[tokio::test]
async fn rejects_move_into_own_subtree() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let child = factory::category::create_child_category(db, root.id).await?;
    let grandchild = factory::category::create_child_category(db, child.id).await?;

    let service = CategoryService::new(db);
    let result = service
        .update(update_params(root.id, &root.name, Some(grandchild.id)))
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .update(update_params(root.id, &root.name, Some(root.id)))
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let detail = service.get(grandchild.id).await?;
    assert_eq!(detail.breadcrumb.len(), 2);

    Ok(())
}

/// Tests moving a subtree to another parent.
///
/// Expected: breadcrumb of the moved descendant follows the new parent
#[tokio::test]
async fn moves_subtree() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let left = factory::category::create_category(db).await?;
    let right = factory::category::create_category(db).await?;
    let child = factory::category::create_child_category(db, left.id).await?;
    let grandchild = factory::category::create_child_category(db, child.id).await?;

    let service = CategoryService::new(db);
    let moved = service
        .update(update_params(child.id, "Renamed", Some(right.id)))
        .await?;

    assert_eq!(moved.category.name, "Renamed");
    assert_eq!(moved.parent_id(), Some(right.id));

    let detail = service.get(grandchild.id).await?;
    let ids: Vec<i32> = detail.breadcrumb.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![right.id, child.id]);

    Ok(())
}

/// Tests updating a missing category.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CategoryService::new(db)
        .update(update_params(77, "Nothing", None))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
