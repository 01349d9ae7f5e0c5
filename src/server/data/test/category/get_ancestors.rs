use super::*;

/// Tests the breadcrumb of a leaf category.
///
/// Expected: Ok with ancestors ordered root first, excluding the category itself
#[tokio::test]
async fn orders_ancestors_root_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let middle = factory::category::create_child_category(db, root.id).await?;
    let leaf = factory::category::create_child_category(db, middle.id).await?;

    let repo = CategoryRepository::new(db);
    let ancestors = repo.get_ancestors(leaf.id).await?;

    assert_eq!(
        ancestors.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![root.id, middle.id]
    );
    assert!(repo.get_ancestors(root.id).await?.is_empty());

    Ok(())
}

/// Tests listing direct children only.
///
/// Expected: Ok with children sorted by name, grandchildren excluded
#[tokio::test]
async fn lists_direct_children_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::category::create_category(db).await?;
    let web = factory::category::CategoryFactory::new(db)
        .name("Web")
        .parent(root.id)
        .build()
        .await?;
    let data = factory::category::CategoryFactory::new(db)
        .name("Data")
        .parent(root.id)
        .build()
        .await?;
    factory::category::create_child_category(db, web.id).await?;

    let repo = CategoryRepository::new(db);
    let children = repo.get_children(root.id).await?;

    assert_eq!(
        children.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![data.id, web.id]
    );

    Ok(())
}
